//! Resto-Ledger Database Crate
//!
//! Data-access layer for the restaurant-expense tracker: connection management,
//! schema setup, repositories, and the existence/consistency checkers the
//! repositories rely on.

use restoledger_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod checks;
pub mod connection;
pub mod entities;
pub mod repos;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use connection::prepare_database;
pub use schema::create_schema;

// Re-export repositories
pub use repos::{
    CategoryRepository, ExpenseRepository, InvoiceRepository, MemberRepository,
    RestaurantRepository, UserRepository,
};

// Re-export entities
pub use entities::{
    Category, CreateCategoryRequest, CreateExpenseRequest, CreateInvoiceRequest,
    CreateMemberRequest, CreateRestaurantRequest, CreateUserRequest, Expense, Invoice,
    MemberSummary, Restaurant, RestaurantSummary, RestaurantUser, RestaurantWithUsers,
    UpdateExpenseRequest, UpdateInvoiceRequest, UpdateRestaurantRequest, UpdateUserRequest, User,
    UserWithRestaurants,
};

// Re-export types
pub use types::{ModelError, ModelResult};

/// Connect to the configured database and ensure the schema exists.
pub async fn initialize_database(config: &DatabaseConfig) -> ModelResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| ModelError::Database(e.to_string()))?;

    create_schema(&pool)
        .await
        .map_err(|e| ModelError::Database(e.to_string()))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialization_creates_a_usable_database() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn scenario_owner_shows_up_on_the_restaurant() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };
        let pool = initialize_database(&config).await.unwrap();

        let users = UserRepository::new(pool.clone());
        let restaurants = RestaurantRepository::new(pool);

        let owner = users
            .create(&CreateUserRequest {
                email: "a@b.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Byron".to_string(),
                password_hash: "hashed-secret123".to_string(),
            })
            .await
            .unwrap();

        let restaurant = restaurants
            .create(&CreateRestaurantRequest {
                owner_id: owner.id,
                name: "Cafe".to_string(),
                address: None,
                phone: None,
                email: None,
                website: None,
                notes: None,
            })
            .await
            .unwrap();

        let with_users = restaurants.get(restaurant.id).await.unwrap();
        assert_eq!(with_users.users.len(), 1);
        assert_eq!(with_users.users[0].id, owner.id);
        assert!(with_users.users[0].is_owner);

        let with_restaurants = users.get(owner.id).await.unwrap();
        assert_eq!(with_restaurants.restaurants.len(), 1);
        assert_eq!(with_restaurants.restaurants[0].name, "Cafe");
    }
}
