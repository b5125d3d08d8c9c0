//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh-token rows are write-once: inserted at mint time, read during
//! validation and rotation, and bulk-deleted by the expiry reaper. There is
//! no status column and no update path.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use tv_core::domain::entities::token::RefreshToken;
use tv_core::errors::StoreError;
use tv_core::repositories::TokenRepository;

use crate::InfrastructureError;

/// MySQL implementation of TokenRepository
///
/// Holds only the pool; cheap to clone one per consumer.
#[derive(Clone)]
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the backing table when it does not exist yet.
    ///
    /// The token column is ASCII (base64url segments) so the composite
    /// primary key stays inside InnoDB's index-length limit; it backs the
    /// `(user_id, token)` point lookup, and the `issued_at` index backs the
    /// reaper's range delete.
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                user_id BIGINT NOT NULL,
                token VARCHAR(768) CHARACTER SET ascii NOT NULL,
                issued_at BIGINT NOT NULL,
                PRIMARY KEY (user_id, token),
                KEY idx_refresh_tokens_issued_at (issued_at)
            )
        "#;

        sqlx::query(ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO refresh_tokens (user_id, token, issued_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.user_id)
            .bind(&token.token)
            .bind(token.issued_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = token.user_id,
                    "could not store refresh token: {e}"
                );
                StoreError::storage(format!("insert refresh token: {e}"))
            })?;

        Ok(())
    }

    async fn find_valid(&self, user_id: i64, token: &str) -> Result<Option<i64>, StoreError> {
        let query = r#"
            SELECT issued_at
            FROM refresh_tokens
            WHERE user_id = ? AND token = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(user_id, "could not look up refresh token: {e}");
                StoreError::storage(format!("find refresh token: {e}"))
            })?;

        match row {
            Some(row) => {
                let issued_at = row
                    .try_get("issued_at")
                    .map_err(|e| StoreError::storage(format!("read issued_at column: {e}")))?;
                Ok(Some(issued_at))
            }
            None => Ok(None),
        }
    }

    async fn find_latest(&self, user_id: i64) -> Result<Option<RefreshToken>, StoreError> {
        let query = r#"
            SELECT token, issued_at
            FROM refresh_tokens
            WHERE user_id = ?
            ORDER BY issued_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(user_id, "could not load latest refresh token: {e}");
                StoreError::storage(format!("find latest refresh token: {e}"))
            })?;

        match row {
            Some(row) => {
                let token: String = row
                    .try_get("token")
                    .map_err(|e| StoreError::storage(format!("read token column: {e}")))?;
                let issued_at: i64 = row
                    .try_get("issued_at")
                    .map_err(|e| StoreError::storage(format!("read issued_at column: {e}")))?;
                Ok(Some(RefreshToken::new(token, user_id, issued_at)))
            }
            None => Ok(None),
        }
    }

    async fn delete_issued_before(&self, cutoff_unix: i64) -> Result<u64, StoreError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE issued_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(cutoff_unix)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("could not delete expired refresh tokens: {e}");
                StoreError::cleanup(format!("delete expired refresh tokens: {e}"))
            })?;

        Ok(result.rows_affected())
    }
}
