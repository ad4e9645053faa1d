//! Invoice repository for database operations.

use crate::checks;
use crate::entities::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

const INVOICE_COLUMNS: &str =
    "id, restaurant_id, date, invoice_number, vendor, total, notes, created_at, updated_at";

/// Repository for invoice database operations
#[derive(Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find invoice by ID
    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Fetch an invoice, raising NotFound if absent.
    pub async fn get(&self, id: i64) -> ModelResult<Invoice> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("invoice", id))
    }

    /// Register an invoice. The (restaurant, vendor, invoice number) triple must be
    /// unused within that restaurant; the same pair is legal across restaurants.
    pub async fn create(&self, request: &CreateInvoiceRequest) -> ModelResult<Invoice> {
        checks::ensure_restaurant_exists(&self.pool, request.restaurant_id).await?;

        let duplicate: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM invoices WHERE restaurant_id = ? AND vendor = ? AND invoice_number = ?",
        )
        .bind(request.restaurant_id)
        .bind(&request.vendor)
        .bind(&request.invoice_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)?;

        if duplicate.is_some() {
            return Err(ModelError::BadRequest(format!(
                "invoice {} from vendor {} already exists for restaurant {}",
                request.invoice_number, request.vendor, request.restaurant_id
            )));
        }

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO invoices (restaurant_id, date, invoice_number, vendor, total, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.restaurant_id)
        .bind(&request.date)
        .bind(&request.invoice_number)
        .bind(&request.vendor)
        .bind(request.total)
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let invoice_id = result.last_insert_rowid();
        info!(
            invoice_id,
            restaurant_id = request.restaurant_id,
            vendor = %request.vendor,
            "registered new invoice"
        );

        self.get(invoice_id).await
    }

    /// All invoices of a restaurant in date order.
    pub async fn find_by_restaurant(&self, restaurant_id: i64) -> ModelResult<Vec<Invoice>> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE restaurant_id = ? ORDER BY date ASC, id ASC"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Invoices of a restaurant between two inclusive ISO dates.
    pub async fn find_by_date_range(
        &self,
        restaurant_id: i64,
        start: &str,
        end: &str,
    ) -> ModelResult<Vec<Invoice>> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices
             WHERE restaurant_id = ? AND date >= ? AND date <= ?
             ORDER BY date ASC, id ASC"
        ))
        .bind(restaurant_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Full-replace update. The uniqueness triple is re-checked identity-preservingly:
    /// only a different invoice already holding the new triple conflicts.
    pub async fn update(&self, id: i64, request: &UpdateInvoiceRequest) -> ModelResult<Invoice> {
        let existing = self.get(id).await?;

        let duplicate: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM invoices
             WHERE restaurant_id = ? AND vendor = ? AND invoice_number = ? AND id != ?",
        )
        .bind(existing.restaurant_id)
        .bind(&request.vendor)
        .bind(&request.invoice_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)?;

        if duplicate.is_some() {
            return Err(ModelError::BadRequest(format!(
                "invoice {} from vendor {} already exists for restaurant {}",
                request.invoice_number, request.vendor, existing.restaurant_id
            )));
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE invoices
             SET date = ?, invoice_number = ?, vendor = ?, total = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.date)
        .bind(&request.invoice_number)
        .bind(&request.vendor)
        .bind(request.total)
        .bind(&request.notes)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        info!(invoice_id = id, "updated invoice");

        self.get(id).await
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::not_found("invoice", id));
        }

        info!(invoice_id = id, "deleted invoice");
        Ok(())
    }
}
