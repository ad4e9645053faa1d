//! Shared helpers for repository tests: a schema-bearing temp pool and raw row
//! seeders that bypass the repositories under test.

use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub(crate) async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(temp_dir.path().join("test.db"))
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await.unwrap();
    crate::schema::create_schema(&pool).await.unwrap();
    (pool, temp_dir)
}

pub(crate) async fn seed_user(pool: &SqlitePool, email: &str) -> i64 {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO users (email, first_name, last_name, password_hash, created_at, updated_at)
         VALUES (?, 'Test', 'User', 'not-a-real-hash', ?, ?)",
    )
    .bind(email)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub(crate) async fn seed_restaurant(pool: &SqlitePool, owner_id: i64, name: &str) -> i64 {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO restaurants (owner_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(owner_id)
    .bind(name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub(crate) async fn seed_category(pool: &SqlitePool, restaurant_id: i64, name: &str) -> i64 {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO categories (restaurant_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(restaurant_id)
    .bind(name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub(crate) async fn seed_invoice(
    pool: &SqlitePool,
    restaurant_id: i64,
    vendor: &str,
    invoice_number: &str,
) -> i64 {
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO invoices (restaurant_id, date, invoice_number, vendor, total, created_at, updated_at)
         VALUES (?, '2024-01-15', ?, ?, 100.0, ?, ?)",
    )
    .bind(restaurant_id)
    .bind(invoice_number)
    .bind(vendor)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}
