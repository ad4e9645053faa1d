//! User repository for database operations.

use crate::entities::{
    CreateUserRequest, RestaurantSummary, UpdateUserRequest, User, UserWithRestaurants,
};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::info;

const USER_COLUMNS: &str = "id, email, first_name, last_name, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Find user by email, case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> ModelResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Register a new user. The email is lowercased before the uniqueness check so
    /// `A@x.com` and `a@x.com` collide.
    pub async fn create(&self, request: &CreateUserRequest) -> ModelResult<User> {
        let email = request.email.to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(ModelError::BadRequest(format!(
                "email {email} is already registered"
            )));
        }

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO users (email, first_name, last_name, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ModelError::BadRequest(format!("email {email} is already registered"))
            } else {
                ModelError::database(e)
            }
        })?;

        let user_id = result.last_insert_rowid();
        info!(user_id, "registered new user");

        self.find_by_id(user_id).await?.ok_or_else(|| {
            ModelError::Database("failed to retrieve created user".to_string())
        })
    }

    /// Fetch a user together with the restaurants they belong to, in membership
    /// insertion order. The enrichment runs as one batched lookup rather than one
    /// query per membership row.
    pub async fn get(&self, id: i64) -> ModelResult<UserWithRestaurants> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("user", id))?;

        let membership_rows = sqlx::query(
            "SELECT restaurant_id, is_owner FROM restaurant_users WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let mut memberships = Vec::with_capacity(membership_rows.len());
        for row in membership_rows {
            let restaurant_id: i64 = row.try_get("restaurant_id").map_err(ModelError::database)?;
            let is_owner: bool = row.try_get("is_owner").map_err(ModelError::database)?;
            memberships.push((restaurant_id, is_owner));
        }

        let mut distinct_ids: Vec<i64> = Vec::new();
        for (restaurant_id, _) in &memberships {
            if !distinct_ids.contains(restaurant_id) {
                distinct_ids.push(*restaurant_id);
            }
        }

        let mut display: HashMap<i64, (String, Option<String>)> = HashMap::new();
        if !distinct_ids.is_empty() {
            let placeholders = distinct_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
            let query_str =
                format!("SELECT id, name, address FROM restaurants WHERE id IN ({placeholders})");

            let mut query = sqlx::query(&query_str);
            for restaurant_id in &distinct_ids {
                query = query.bind(*restaurant_id);
            }

            let rows = query
                .fetch_all(&self.pool)
                .await
                .map_err(ModelError::database)?;

            for row in rows {
                let restaurant_id: i64 = row.try_get("id").map_err(ModelError::database)?;
                let name: String = row.try_get("name").map_err(ModelError::database)?;
                let address: Option<String> =
                    row.try_get("address").map_err(ModelError::database)?;
                display.insert(restaurant_id, (name, address));
            }
        }

        let restaurants = memberships
            .into_iter()
            .filter_map(|(restaurant_id, is_owner)| {
                display
                    .get(&restaurant_id)
                    .map(|(name, address)| RestaurantSummary {
                        id: restaurant_id,
                        name: name.clone(),
                        address: address.clone(),
                        is_owner,
                    })
            })
            .collect();

        Ok(UserWithRestaurants { user, restaurants })
    }

    /// Full-replace update. The email uniqueness check is identity-preserving: a row
    /// holding the new email only conflicts if it is a different user.
    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> ModelResult<User> {
        if self.find_by_id(id).await?.is_none() {
            return Err(ModelError::not_found("user", id));
        }

        let email = request.email.to_lowercase();
        if let Some(existing) = self.find_by_email(&email).await? {
            if existing.id != id {
                return Err(ModelError::BadRequest(format!(
                    "email {email} is already registered"
                )));
            }
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE users SET email = ?, first_name = ?, last_name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        info!(user_id = id, "updated user");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("user", id))
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::not_found("user", id));
        }

        info!(user_id = id, "deleted user");
        Ok(())
    }
}
