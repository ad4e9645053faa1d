//! Existence and consistency checkers.
//!
//! Repositories call these before mutating so that no row is ever created under a
//! missing parent, and so the expense consistency rule holds on both create and
//! update.

use crate::types::{ModelError, ModelResult};
use sqlx::SqlitePool;

/// Fail with NotFound unless the user id exists.
pub async fn ensure_user_exists(pool: &SqlitePool, id: i64) -> ModelResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(ModelError::database)?;

    if count == 0 {
        return Err(ModelError::not_found("user", id));
    }
    Ok(())
}

/// Fail with NotFound unless the restaurant id exists.
pub async fn ensure_restaurant_exists(pool: &SqlitePool, id: i64) -> ModelResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(ModelError::database)?;

    if count == 0 {
        return Err(ModelError::not_found("restaurant", id));
    }
    Ok(())
}

/// Fail with NotFound unless the invoice id exists.
pub async fn ensure_invoice_exists(pool: &SqlitePool, id: i64) -> ModelResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(ModelError::database)?;

    if count == 0 {
        return Err(ModelError::not_found("invoice", id));
    }
    Ok(())
}

/// Fail with NotFound unless the category id exists.
pub async fn ensure_category_exists(pool: &SqlitePool, id: i64) -> ModelResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(ModelError::database)?;

    if count == 0 {
        return Err(ModelError::not_found("category", id));
    }
    Ok(())
}

/// Verify the invoice exists, the category exists, and both belong to the same
/// restaurant. Returns that restaurant's id so callers can stamp it onto the
/// expense row.
pub async fn ensure_same_restaurant(
    pool: &SqlitePool,
    category_id: i64,
    invoice_id: i64,
) -> ModelResult<i64> {
    let invoice_restaurant: Option<i64> =
        sqlx::query_scalar("SELECT restaurant_id FROM invoices WHERE id = ?")
            .bind(invoice_id)
            .fetch_optional(pool)
            .await
            .map_err(ModelError::database)?;

    let Some(invoice_restaurant) = invoice_restaurant else {
        return Err(ModelError::not_found("invoice", invoice_id));
    };

    let category_restaurant: Option<i64> =
        sqlx::query_scalar("SELECT restaurant_id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(pool)
            .await
            .map_err(ModelError::database)?;

    let Some(category_restaurant) = category_restaurant else {
        return Err(ModelError::not_found("category", category_id));
    };

    if category_restaurant != invoice_restaurant {
        return Err(ModelError::BadRequest(format!(
            "category {category_id} does not belong to the same restaurant as invoice {invoice_id}"
        )));
    }

    Ok(invoice_restaurant)
}
