//! Classifier and intent error types.

use thiserror::Error;

/// Errors talking to the language-understanding service.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not finish within the configured timeout.
    #[error("classifier request timed out")]
    Timeout,

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The response envelope could not be read.
    #[error("parse error: {0}")]
    Parse(String),

    /// No API key configured.
    #[error("classifier is not configured (set gemini.api_key)")]
    NotConfigured,
}

/// Why a classifier reply could not become an [`Intent`](crate::Intent).
#[derive(Debug, Error)]
pub enum IntentError {
    /// The reply was not a JSON object.
    #[error("reply is not a JSON object: {0}")]
    Malformed(String),

    #[error("unrecognized action '{0}'")]
    UnknownAction(String),

    #[error("unrecognized list filter '{0}'")]
    UnknownFilter(String),

    /// The reply did not match the intent schema.
    #[error("reply failed schema validation: {errors:?}")]
    Schema { errors: Vec<String> },

    /// A schedule field was present but unusable.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },
}
