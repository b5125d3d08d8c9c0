//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{StoreError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Fatal misconfiguration (e.g. missing signing key); the process must
    /// not start serving traffic.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Internal failure. Callers present this as a generic internal error;
    /// the message is for logs only.
    #[error("internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
