//! Expense category entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An expense category scoped to one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub restaurant_id: i64,
    pub name: String,
    pub notes: Option<String>,
}
