//! User entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. Never carries password material; the hash stays inside the
/// users table and the auth crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for creating a new user. The password arrives already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Full-replace update of a user's profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Display projection of a restaurant the user belongs to, enriched from the
/// membership row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub is_owner: bool,
}

/// A user together with the restaurants they are a member of, in membership
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRestaurants {
    #[serde(flatten)]
    pub user: User,
    pub restaurants: Vec<RestaurantSummary>,
}
