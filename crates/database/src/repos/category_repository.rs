//! Category repository. Categories stay a thin collaborator: they exist so the
//! expense consistency rule has something to reference.

use crate::checks;
use crate::entities::{Category, CreateCategoryRequest};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

const CATEGORY_COLUMNS: &str = "id, restaurant_id, name, notes, created_at, updated_at";

/// Repository for category database operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Fetch a category, raising NotFound if absent.
    pub async fn get(&self, id: i64) -> ModelResult<Category> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("category", id))
    }

    /// Create a category under an existing restaurant.
    pub async fn create(&self, request: &CreateCategoryRequest) -> ModelResult<Category> {
        checks::ensure_restaurant_exists(&self.pool, request.restaurant_id).await?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO categories (restaurant_id, name, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.restaurant_id)
        .bind(&request.name)
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let category_id = result.last_insert_rowid();
        info!(
            category_id,
            restaurant_id = request.restaurant_id,
            "created category"
        );

        self.get(category_id).await
    }

    /// All categories of a restaurant, in insertion order.
    pub async fn find_by_restaurant(&self, restaurant_id: i64) -> ModelResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE restaurant_id = ? ORDER BY id ASC"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::not_found("category", id));
        }

        info!(category_id = id, "deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{create_test_pool, seed_restaurant, seed_user};

    #[tokio::test]
    async fn create_get_list_delete() {
        let (pool, _temp_dir) = create_test_pool().await;
        let owner_id = seed_user(&pool, "owner@x.com").await;
        let restaurant_id = seed_restaurant(&pool, owner_id, "Cafe").await;
        let repo = CategoryRepository::new(pool);

        let category = repo
            .create(&CreateCategoryRequest {
                restaurant_id,
                name: "Produce".to_string(),
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(repo.get(category.id).await.unwrap(), category);
        assert_eq!(repo.find_by_restaurant(restaurant_id).await.unwrap().len(), 1);

        repo.delete(category.id).await.unwrap();
        let err = repo.delete(category.id).await.unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_restaurant_fails_creation() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = CategoryRepository::new(pool);

        let err = repo
            .create(&CreateCategoryRequest {
                restaurant_id: 77,
                name: "Produce".to_string(),
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }
}
