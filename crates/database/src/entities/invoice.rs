//! Invoice entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vendor invoice for one restaurant. Dates are ISO `YYYY-MM-DD` strings so
/// lexicographic range queries match chronological order. The
/// (restaurant_id, vendor, invoice_number) triple is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub restaurant_id: i64,
    pub date: String,
    pub invoice_number: String,
    pub vendor: String,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for registering a new invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub restaurant_id: i64,
    pub date: String,
    pub invoice_number: String,
    pub vendor: String,
    pub total: f64,
    pub notes: Option<String>,
}

/// Full-replace update of an invoice. The restaurant it belongs to is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub date: String,
    pub invoice_number: String,
    pub vendor: String,
    pub total: f64,
    pub notes: Option<String>,
}
