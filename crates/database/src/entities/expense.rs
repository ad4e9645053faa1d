//! Expense entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An expense line referencing an invoice and a category. Both must belong to the
/// same restaurant; the expense inherits that restaurant id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub restaurant_id: i64,
    pub category_id: i64,
    pub invoice_id: i64,
    pub amount: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for registering a new expense. The restaurant id is derived from the
/// invoice after the consistency check passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub category_id: i64,
    pub invoice_id: i64,
    pub amount: f64,
    pub notes: Option<String>,
}

/// Full-replace update of an expense. Re-validated against the new category and
/// invoice, not just existence of the expense itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub category_id: i64,
    pub invoice_id: i64,
    pub amount: f64,
    pub notes: Option<String>,
}
