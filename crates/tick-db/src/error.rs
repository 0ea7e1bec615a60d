//! Database error types for tick-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Input rejected before reaching SQL.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tick_core::errors::CoreError> for DatabaseError {
    fn from(error: tick_core::errors::CoreError) -> Self {
        match error {
            tick_core::errors::CoreError::Validation(reason) => Self::Validation(reason),
            tick_core::errors::CoreError::NotFound { .. } => Self::NoResult,
            tick_core::errors::CoreError::Other(other) => Self::Other(other),
        }
    }
}
