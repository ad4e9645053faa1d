//! Restaurant membership (join table) entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A membership row linking a user to a restaurant. The (restaurant_id, user_id)
/// pair is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RestaurantUser {
    pub id: i64,
    pub restaurant_id: i64,
    pub user_id: i64,
    pub is_owner: bool,
    pub created_at: String,
}

/// Request for linking a user to a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub restaurant_id: i64,
    pub user_id: i64,
    pub is_owner: bool,
}
