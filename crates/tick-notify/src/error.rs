use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP host or sender address missing.
    #[error("SMTP is not configured (set smtp.host and smtp.from)")]
    NotConfigured,

    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
