//! Authentication for the Resto-Ledger backend.
//!
//! Wraps bcrypt hashing/verification with the configured work factor and exposes the
//! two credential operations: registering a user (hash, then delegate to the user
//! repository) and authenticating one. A missing account and a wrong password are
//! deliberately collapsed into the same `Unauthorized` error so callers cannot probe
//! which email addresses are registered.

use restoledger_config::AuthConfig;
use restoledger_database::{
    CreateUserRequest, ModelError, ModelResult, User, UserRepository,
};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Registration payload carrying the plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Hash a password with bcrypt at the given cost. Runs on a blocking thread so the
/// reactor is never stalled by the deliberately slow hash.
pub async fn hash_password(password: &str, work_factor: u32) -> ModelResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, work_factor))
        .await
        .map_err(|e| ModelError::Database(format!("hashing task failed: {e}")))?
        .map_err(|e| ModelError::Database(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored bcrypt hash, on a blocking thread.
pub async fn verify_password(password: &str, hash: &str) -> ModelResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ModelError::Database(format!("verification task failed: {e}")))?
        .map_err(|e| ModelError::Database(format!("password verification failed: {e}")))
}

/// Credential operations bound to one pool and work factor.
#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    work_factor: u32,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            pool,
            work_factor: config.work_factor,
        }
    }

    /// Register a new user: hash the password with the configured work factor, then
    /// hand off to the user repository, which enforces email uniqueness.
    pub async fn register(&self, request: &RegisterRequest) -> ModelResult<User> {
        let password_hash = hash_password(&request.password, self.work_factor).await?;

        let repo = UserRepository::new(self.pool.clone());
        repo.create(&CreateUserRequest {
            email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            password_hash,
        })
        .await
    }

    /// Authenticate by email and password. The email lookup is case-insensitive and
    /// the returned profile carries no password material. Both failure sides raise
    /// `Unauthorized` with no further detail.
    pub async fn authenticate(&self, email: &str, password: &str) -> ModelResult<User> {
        let row = sqlx::query(
            "SELECT id, email, first_name, last_name, password_hash, created_at, updated_at
             FROM users WHERE LOWER(email) = LOWER(?)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(ModelError::database)?;

        let Some(row) = row else {
            return Err(ModelError::Unauthorized);
        };

        let password_hash: String = row.try_get("password_hash").map_err(ModelError::database)?;
        if !verify_password(password, &password_hash).await? {
            return Err(ModelError::Unauthorized);
        }

        let user = User {
            id: row.try_get("id").map_err(ModelError::database)?,
            email: row.try_get("email").map_err(ModelError::database)?,
            first_name: row.try_get("first_name").map_err(ModelError::database)?,
            last_name: row.try_get("last_name").map_err(ModelError::database)?,
            created_at: row.try_get("created_at").map_err(ModelError::database)?,
            updated_at: row.try_get("updated_at").map_err(ModelError::database)?,
        };

        info!(user_id = user.id, "user authenticated");
        Ok(user)
    }
}
