//! Cross-cutting error types for Tickler.
//!
//! Domain-specific errors (`DatabaseError`, `NotifyError`, `ClassifierError`)
//! live in their own crates. `CoreError` covers the checks every crate shares:
//! input validation and schedule parsing.

use thiserror::Error;

/// Errors that can be raised by any Tickler crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (empty title, bad email, malformed date).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
