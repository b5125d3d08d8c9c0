//! Error type definitions for token and storage operations
//!
//! Token errors are safe to surface to end users verbatim. Store errors are
//! internal: they are logged with operation context and reach callers only
//! as a generic internal error.

use thiserror::Error;

/// Token-related errors
///
/// Expired, invalid, and reaped refresh tokens are deliberately
/// indistinguishable to the end user: all three read as "please
/// re-authenticate".
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature was found to be invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("access token is expired")]
    AccessTokenExpired,

    #[error("refresh token is expired, please login again")]
    RefreshTokenExpired,

    #[error("could not validate refresh token, please login again")]
    RefreshTokenInvalid,

    #[error("failed to sign and generate a token")]
    MintFailed,
}

/// Storage-boundary errors
///
/// Messages carry diagnostic context for logs (user id, operation) and must
/// never include the token string or the signing key.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage failure: {message}")]
    StorageFailure { message: String },

    #[error("cleanup failure: {message}")]
    CleanupFailure { message: String },
}

impl StoreError {
    /// Write-path failure with diagnostic context
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
        }
    }

    /// Bulk-delete failure with diagnostic context
    pub fn cleanup(message: impl Into<String>) -> Self {
        Self::CleanupFailure {
            message: message.into(),
        }
    }
}
