//! Error taxonomy for the model layer.
//!
//! Every failure is one of four kinds so the HTTP collaborator can map each to a
//! status code without inspecting message text.

use thiserror::Error;

/// Error raised by repositories and checkers.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A referenced entity is absent. The message names the kind and id.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness or cross-entity consistency rule was violated.
    #[error("{0}")]
    BadRequest(String),

    /// Credential mismatch. Deliberately carries no detail: a missing account and a
    /// wrong password are indistinguishable to the caller.
    #[error("invalid credentials")]
    Unauthorized,

    /// Storage-layer failure, surfaced unchanged.
    #[error("database error: {0}")]
    Database(String),
}

impl ModelError {
    pub fn database(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }

    pub fn not_found(kind: &str, id: i64) -> Self {
        Self::NotFound(format!("{kind} {id} does not exist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let err = ModelError::not_found("restaurant", 42);
        assert_eq!(err.to_string(), "restaurant 42 does not exist");
    }

    #[test]
    fn unauthorized_carries_no_detail() {
        assert_eq!(ModelError::Unauthorized.to_string(), "invalid credentials");
    }
}
