//! Shared types for the database layer.

pub mod errors;

pub use errors::ModelError;

/// Result type used by every repository and checker.
pub type ModelResult<T> = Result<T, ModelError>;
