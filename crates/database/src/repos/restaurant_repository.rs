//! Restaurant repository for database operations.

use crate::checks;
use crate::entities::{
    CreateRestaurantRequest, MemberSummary, Restaurant, RestaurantWithUsers,
    UpdateRestaurantRequest,
};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::info;

const RESTAURANT_COLUMNS: &str =
    "id, owner_id, name, address, phone, email, website, notes, created_at, updated_at";

/// Repository for restaurant database operations
#[derive(Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    /// Create a new restaurant repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find restaurant by ID
    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Restaurant>> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Register a restaurant. The owner must exist, email and website are lowercased
    /// when present, and the owner membership row is written in the same transaction
    /// as the restaurant itself so no reader ever observes an ownerless restaurant.
    pub async fn create(&self, request: &CreateRestaurantRequest) -> ModelResult<Restaurant> {
        checks::ensure_user_exists(&self.pool, request.owner_id).await?;

        let email = request.email.as_ref().map(|e| e.to_lowercase());
        let website = request.website.as_ref().map(|w| w.to_lowercase());
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await.map_err(ModelError::database)?;

        let result = sqlx::query(
            "INSERT INTO restaurants (owner_id, name, address, phone, email, website, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.owner_id)
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.phone)
        .bind(&email)
        .bind(&website)
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(ModelError::database)?;

        let restaurant_id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO restaurant_users (restaurant_id, user_id, is_owner, created_at)
             VALUES (?, ?, true, ?)",
        )
        .bind(restaurant_id)
        .bind(request.owner_id)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(ModelError::database)?;

        tx.commit().await.map_err(ModelError::database)?;

        info!(
            restaurant_id,
            owner_id = request.owner_id,
            "registered new restaurant"
        );

        self.find_by_id(restaurant_id).await?.ok_or_else(|| {
            ModelError::Database("failed to retrieve created restaurant".to_string())
        })
    }

    /// Fetch a restaurant together with its members, in membership insertion order,
    /// enriched with user display fields via one batched lookup.
    pub async fn get(&self, id: i64) -> ModelResult<RestaurantWithUsers> {
        let restaurant = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("restaurant", id))?;

        let membership_rows = sqlx::query(
            "SELECT user_id, is_owner FROM restaurant_users WHERE restaurant_id = ? ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let mut memberships = Vec::with_capacity(membership_rows.len());
        for row in membership_rows {
            let user_id: i64 = row.try_get("user_id").map_err(ModelError::database)?;
            let is_owner: bool = row.try_get("is_owner").map_err(ModelError::database)?;
            memberships.push((user_id, is_owner));
        }

        let mut distinct_ids: Vec<i64> = Vec::new();
        for (user_id, _) in &memberships {
            if !distinct_ids.contains(user_id) {
                distinct_ids.push(*user_id);
            }
        }

        let mut display: HashMap<i64, (String, String, String)> = HashMap::new();
        if !distinct_ids.is_empty() {
            let placeholders = distinct_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
            let query_str = format!(
                "SELECT id, email, first_name, last_name FROM users WHERE id IN ({placeholders})"
            );

            let mut query = sqlx::query(&query_str);
            for user_id in &distinct_ids {
                query = query.bind(*user_id);
            }

            let rows = query
                .fetch_all(&self.pool)
                .await
                .map_err(ModelError::database)?;

            for row in rows {
                let user_id: i64 = row.try_get("id").map_err(ModelError::database)?;
                let email: String = row.try_get("email").map_err(ModelError::database)?;
                let first_name: String = row.try_get("first_name").map_err(ModelError::database)?;
                let last_name: String = row.try_get("last_name").map_err(ModelError::database)?;
                display.insert(user_id, (email, first_name, last_name));
            }
        }

        let users = memberships
            .into_iter()
            .filter_map(|(user_id, is_owner)| {
                display
                    .get(&user_id)
                    .map(|(email, first_name, last_name)| MemberSummary {
                        id: user_id,
                        email: email.clone(),
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        is_owner,
                    })
            })
            .collect();

        Ok(RestaurantWithUsers { restaurant, users })
    }

    /// All restaurants a user is a member of, in membership insertion order.
    pub async fn list_for_user(&self, user_id: i64) -> ModelResult<Vec<Restaurant>> {
        sqlx::query_as::<_, Restaurant>(
            "SELECT r.id, r.owner_id, r.name, r.address, r.phone, r.email, r.website, r.notes, r.created_at, r.updated_at
             FROM restaurants r
             JOIN restaurant_users ru ON ru.restaurant_id = r.id
             WHERE ru.user_id = ?
             ORDER BY ru.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Full-replace update of the restaurant's fields.
    pub async fn update(&self, id: i64, request: &UpdateRestaurantRequest) -> ModelResult<Restaurant> {
        if self.find_by_id(id).await?.is_none() {
            return Err(ModelError::not_found("restaurant", id));
        }

        let email = request.email.as_ref().map(|e| e.to_lowercase());
        let website = request.website.as_ref().map(|w| w.to_lowercase());
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE restaurants
             SET name = ?, address = ?, phone = ?, email = ?, website = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.phone)
        .bind(&email)
        .bind(&website)
        .bind(&request.notes)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        info!(restaurant_id = id, "updated restaurant");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("restaurant", id))
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::not_found("restaurant", id));
        }

        info!(restaurant_id = id, "deleted restaurant");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{create_test_pool, seed_user};

    fn request(owner_id: i64, name: &str) -> CreateRestaurantRequest {
        CreateRestaurantRequest {
            owner_id,
            name: name.to_string(),
            address: Some("1 Main St".to_string()),
            phone: None,
            email: Some("Contact@Cafe.COM".to_string()),
            website: Some("HTTPS://Cafe.example".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn creation_links_the_owner() {
        let (pool, _temp_dir) = create_test_pool().await;
        let owner_id = seed_user(&pool, "owner@x.com").await;
        let repo = RestaurantRepository::new(pool);

        let restaurant = repo.create(&request(owner_id, "Cafe")).await.unwrap();
        assert_eq!(restaurant.email.as_deref(), Some("contact@cafe.com"));
        assert_eq!(restaurant.website.as_deref(), Some("https://cafe.example"));

        let with_users = repo.get(restaurant.id).await.unwrap();
        assert_eq!(with_users.users.len(), 1);
        assert_eq!(with_users.users[0].id, owner_id);
        assert!(with_users.users[0].is_owner);
    }

    #[tokio::test]
    async fn absent_optional_fields_stay_null() {
        let (pool, _temp_dir) = create_test_pool().await;
        let owner_id = seed_user(&pool, "owner@x.com").await;
        let repo = RestaurantRepository::new(pool);

        let restaurant = repo
            .create(&CreateRestaurantRequest {
                owner_id,
                name: "Bistro".to_string(),
                address: None,
                phone: None,
                email: None,
                website: None,
                notes: None,
            })
            .await
            .unwrap();

        assert!(restaurant.email.is_none());
        assert!(restaurant.website.is_none());
    }

    #[tokio::test]
    async fn missing_owner_fails_before_any_write() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RestaurantRepository::new(pool.clone());

        let err = repo.create(&request(404, "Cafe")).await.unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn get_missing_restaurant_raises_not_found() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RestaurantRepository::new(pool);

        let err = repo.get(55).await.unwrap_err();
        match err {
            ModelError::NotFound(msg) => assert!(msg.contains("55")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (pool, _temp_dir) = create_test_pool().await;
        let owner_id = seed_user(&pool, "owner@x.com").await;
        let repo = RestaurantRepository::new(pool);

        let restaurant = repo.create(&request(owner_id, "Cafe")).await.unwrap();
        let updated = repo
            .update(
                restaurant.id,
                &UpdateRestaurantRequest {
                    name: "Cafe Deux".to_string(),
                    address: None,
                    phone: Some("555-0101".to_string()),
                    email: None,
                    website: None,
                    notes: Some("renamed".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Cafe Deux");
        assert!(updated.address.is_none());
        assert!(updated.email.is_none());
        assert_eq!(updated.phone.as_deref(), Some("555-0101"));
    }

    #[tokio::test]
    async fn list_for_user_follows_membership_order() {
        let (pool, _temp_dir) = create_test_pool().await;
        let owner_id = seed_user(&pool, "owner@x.com").await;
        let repo = RestaurantRepository::new(pool);

        repo.create(&request(owner_id, "Cafe")).await.unwrap();
        repo.create(&request(owner_id, "Bistro")).await.unwrap();

        let restaurants = repo.list_for_user(owner_id).await.unwrap();
        let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cafe", "Bistro"]);
    }

    #[tokio::test]
    async fn delete_missing_restaurant_names_the_id() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = RestaurantRepository::new(pool);

        let err = repo.delete(31).await.unwrap_err();
        match err {
            ModelError::NotFound(msg) => assert!(msg.contains("31")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
