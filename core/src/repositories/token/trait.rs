//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::StoreError;

/// Repository trait for refresh-token persistence
///
/// This is the sole authority for refresh-token durability. Rows are
/// write-once: implementations insert, read, and bulk-delete, never update.
/// Implementations must be safe for concurrent use from any number of
/// request tasks plus the expiry reaper; synchronization is delegated to the
/// underlying store's connection pooling and row-level isolation.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly minted refresh token.
    ///
    /// Duplicate `(user_id, token)` pairs are a caller error and are not
    /// validated here beyond what the schema enforces.
    async fn insert(&self, token: &RefreshToken) -> Result<(), StoreError>;

    /// Point lookup of a presented token for a user.
    ///
    /// # Returns
    /// * `Ok(Some(issued_at))` - A matching row exists
    /// * `Ok(None)` - No matching row; "never issued" and "already reaped"
    ///   are indistinguishable by design
    /// * `Err(StoreError)` - Underlying read failure
    async fn find_valid(&self, user_id: i64, token: &str) -> Result<Option<i64>, StoreError>;

    /// The most recently issued token for a user, or `None` if the user has
    /// no rows. Used only to decide whether rotation can be skipped.
    async fn find_latest(&self, user_id: i64) -> Result<Option<RefreshToken>, StoreError>;

    /// Bulk-delete every row whose `issued_at` is strictly before the
    /// cutoff.
    ///
    /// The returned row count is for observability only; callers never act
    /// on it.
    async fn delete_issued_before(&self, cutoff_unix: i64) -> Result<u64, StoreError>;
}
