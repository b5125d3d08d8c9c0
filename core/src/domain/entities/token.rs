//! Token entities for signed session credentials.

use serde::{Deserialize, Serialize};

/// Claims structure for the signed-token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Owning principal
    pub user_id: i64,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims binding a user to an issuance window
    pub fn new(user_id: i64, issued_at: i64, expires_at: i64) -> Self {
        Self {
            user_id,
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Whether the embedded expiry has passed at `now_unix`.
    ///
    /// `now == exp` counts as expired: a token is valid for exactly
    /// `exp - iat` seconds.
    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        now_unix >= self.exp
    }
}

/// Refresh token entity persisted in the database
///
/// Rows are write-once: a stored token is only ever read or deleted, never
/// updated. The `near_end_of_life` flag is derived during validation and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// The signed token string. Opaque to the store; together with
    /// `user_id` it uniquely identifies a row.
    pub token: String,

    /// User this token belongs to
    pub user_id: i64,

    /// Unix timestamp set at mint time, immutable thereafter
    pub issued_at: i64,

    near_end_of_life: bool,
}

impl RefreshToken {
    /// Creates a new refresh token entity
    pub fn new(token: impl Into<String>, user_id: i64, issued_at: i64) -> Self {
        Self {
            token: token.into(),
            user_id,
            issued_at,
            near_end_of_life: false,
        }
    }

    /// Seconds of validity left at `now_unix` given the configured lifetime.
    /// Zero or negative means the token is expired.
    pub fn remaining_lifetime_secs(&self, lifetime_secs: i64, now_unix: i64) -> i64 {
        lifetime_secs - (now_unix - self.issued_at)
    }

    /// Returns true if validation found this token close to expiry and the
    /// caller should rotate it
    pub fn is_near_end_of_life(&self) -> bool {
        self.near_end_of_life
    }

    pub(crate) fn mark_near_end_of_life(&mut self) {
        self.near_end_of_life = true;
    }
}
