//! Expense repository for database operations.

use crate::checks;
use crate::entities::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::types::{ModelError, ModelResult};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

const EXPENSE_COLUMNS: &str =
    "id, restaurant_id, category_id, invoice_id, amount, notes, created_at, updated_at";

/// Repository for expense database operations
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find expense by ID
    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Fetch an expense, raising NotFound if absent.
    pub async fn get(&self, id: i64) -> ModelResult<Expense> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ModelError::not_found("expense", id))
    }

    /// Register an expense. The invoice and category must both exist and belong to
    /// the same restaurant; the expense inherits that restaurant id.
    pub async fn create(&self, request: &CreateExpenseRequest) -> ModelResult<Expense> {
        let restaurant_id =
            checks::ensure_same_restaurant(&self.pool, request.category_id, request.invoice_id)
                .await?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO expenses (restaurant_id, category_id, invoice_id, amount, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(restaurant_id)
        .bind(request.category_id)
        .bind(request.invoice_id)
        .bind(request.amount)
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let expense_id = result.last_insert_rowid();
        info!(
            expense_id,
            restaurant_id,
            invoice_id = request.invoice_id,
            "registered new expense"
        );

        self.get(expense_id).await
    }

    /// All expenses attached to an invoice, in insertion order.
    pub async fn find_by_invoice(&self, invoice_id: i64) -> ModelResult<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE invoice_id = ? ORDER BY id ASC"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// All expenses of a restaurant, in insertion order.
    pub async fn find_by_restaurant(&self, restaurant_id: i64) -> ModelResult<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE restaurant_id = ? ORDER BY id ASC"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ModelError::database)
    }

    /// Full-replace update. The consistency rule is re-validated against the *new*
    /// category and invoice, not just existence of the expense.
    pub async fn update(&self, id: i64, request: &UpdateExpenseRequest) -> ModelResult<Expense> {
        if self.find_by_id(id).await?.is_none() {
            return Err(ModelError::not_found("expense", id));
        }

        let restaurant_id =
            checks::ensure_same_restaurant(&self.pool, request.category_id, request.invoice_id)
                .await?;

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE expenses
             SET restaurant_id = ?, category_id = ?, invoice_id = ?, amount = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(restaurant_id)
        .bind(request.category_id)
        .bind(request.invoice_id)
        .bind(request.amount)
        .bind(&request.notes)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ModelError::database)?;

        info!(expense_id = id, "updated expense");

        self.get(id).await
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ModelError::database)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::not_found("expense", id));
        }

        info!(expense_id = id, "deleted expense");
        Ok(())
    }
}
