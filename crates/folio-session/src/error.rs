//! Error types for the session crate.

use thiserror::Error;

/// Errors that can occur in session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The supplied password does not match the admin secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session exists for the client.
    #[error("no active session")]
    NotFound,

    /// The session outlived its expiry and was removed.
    #[error("session expired")]
    Expired,

    /// The session exists but carries no admin grant.
    #[error("session is not authorized")]
    NotAdmin,

    /// The configured lifetime pushes the expiry past the representable range.
    #[error("session expiry out of range")]
    ExpiryOutOfRange,

    /// A session ID could not be parsed.
    #[error("malformed session id: {0}")]
    MalformedId(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
