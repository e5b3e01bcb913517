//! Error types for the content crate.

use thiserror::Error;

/// Errors that can occur in content operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required field was missing or a field was malformed.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Writing to the audit log failed.
    #[error("audit log error: {0}")]
    Audit(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<validator::ValidationError> for ContentError {
    fn from(err: validator::ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Validation failed: {}", err.code));
        ContentError::Validation(message)
    }
}

/// Result type for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;
