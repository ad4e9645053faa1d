//! Repository for restaurant membership (join table) operations.

use crate::entities::{CreateMemberRequest, RestaurantUser};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

/// Repository for restaurant_users database operations
#[derive(Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all members of a restaurant, in insertion order.
    pub async fn find_by_restaurant(&self, restaurant_id: i64) -> ModelResult<Vec<RestaurantUser>> {
        sqlx::query_as::<_, RestaurantUser>(
            "SELECT id, restaurant_id, user_id, is_owner, created_at
             FROM restaurant_users WHERE restaurant_id = ? ORDER BY id ASC",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Find all memberships of a user, in insertion order.
    pub async fn find_by_user(&self, user_id: i64) -> ModelResult<Vec<RestaurantUser>> {
        sqlx::query_as::<_, RestaurantUser>(
            "SELECT id, restaurant_id, user_id, is_owner, created_at
             FROM restaurant_users WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Find one membership by its (restaurant, user) pair.
    pub async fn find_by_restaurant_and_user(
        &self,
        restaurant_id: i64,
        user_id: i64,
    ) -> ModelResult<Option<RestaurantUser>> {
        sqlx::query_as::<_, RestaurantUser>(
            "SELECT id, restaurant_id, user_id, is_owner, created_at
             FROM restaurant_users WHERE restaurant_id = ? AND user_id = ?",
        )
        .bind(restaurant_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Link a user to a restaurant. The (restaurant, user) pair is unique.
    pub async fn create(&self, request: &CreateMemberRequest) -> ModelResult<RestaurantUser> {
        if self
            .find_by_restaurant_and_user(request.restaurant_id, request.user_id)
            .await?
            .is_some()
        {
            return Err(ModelError::BadRequest(format!(
                "user {} is already a member of restaurant {}",
                request.user_id, request.restaurant_id
            )));
        }

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO restaurant_users (restaurant_id, user_id, is_owner, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(request.restaurant_id)
        .bind(request.user_id)
        .bind(request.is_owner)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let member_id = result.last_insert_rowid();
        info!(
            member_id,
            restaurant_id = request.restaurant_id,
            user_id = request.user_id,
            is_owner = request.is_owner,
            "linked user to restaurant"
        );

        Ok(RestaurantUser {
            id: member_id,
            restaurant_id: request.restaurant_id,
            user_id: request.user_id,
            is_owner: request.is_owner,
            created_at: now,
        })
    }

    /// Check if a user is a member of a restaurant.
    pub async fn is_member(&self, restaurant_id: i64, user_id: i64) -> ModelResult<bool> {
        let member = self
            .find_by_restaurant_and_user(restaurant_id, user_id)
            .await?;
        Ok(member.is_some())
    }

    /// Check if a user holds the ownership flag for a restaurant.
    pub async fn is_owner(&self, restaurant_id: i64, user_id: i64) -> ModelResult<bool> {
        let member = self
            .find_by_restaurant_and_user(restaurant_id, user_id)
            .await?;
        Ok(member.map(|m| m.is_owner).unwrap_or(false))
    }

    /// Remove a membership.
    pub async fn delete(&self, restaurant_id: i64, user_id: i64) -> ModelResult<()> {
        let result = sqlx::query(
            "DELETE FROM restaurant_users WHERE restaurant_id = ? AND user_id = ?",
        )
        .bind(restaurant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound(format!(
                "user {user_id} is not a member of restaurant {restaurant_id}"
            )));
        }

        info!(restaurant_id, user_id, "removed restaurant membership");
        Ok(())
    }
}
