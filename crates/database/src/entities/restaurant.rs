//! Restaurant entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A restaurant tracked by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for creating a new restaurant. The owner membership row is created
/// alongside the restaurant itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantRequest {
    pub owner_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// Full-replace update of a restaurant's fields. Ownership does not change here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// Display projection of a member user, enriched from the membership row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_owner: bool,
}

/// A restaurant together with its members, in membership insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantWithUsers {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub users: Vec<MemberSummary>,
}
