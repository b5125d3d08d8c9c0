//! Mock implementations of TokenRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::StoreError;

use super::r#trait::TokenRepository;

/// In-memory token repository for testing
pub struct MockTokenRepository {
    tokens: Arc<RwLock<Vec<RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of rows currently held
    pub async fn row_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.push(token.clone());
        Ok(())
    }

    async fn find_valid(&self, user_id: i64, token: &str) -> Result<Option<i64>, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .find(|t| t.user_id == user_id && t.token == token)
            .map(|t| t.issued_at))
    }

    async fn find_latest(&self, user_id: i64) -> Result<Option<RefreshToken>, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .max_by_key(|t| t.issued_at)
            .cloned())
    }

    async fn delete_issued_before(&self, cutoff_unix: i64) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|t| t.issued_at >= cutoff_unix);
        Ok((before - tokens.len()) as u64)
    }
}

/// Repository whose operations can be made to fail individually, for
/// exercising error paths
pub struct FailingTokenRepository {
    inner: MockTokenRepository,
    pub fail_insert: bool,
    pub fail_find_valid: bool,
    pub fail_find_latest: bool,
    pub fail_delete: bool,
}

impl FailingTokenRepository {
    pub fn new() -> Self {
        Self {
            inner: MockTokenRepository::new(),
            fail_insert: false,
            fail_find_valid: false,
            fail_find_latest: false,
            fail_delete: false,
        }
    }

    pub async fn row_count(&self) -> usize {
        self.inner.row_count().await
    }
}

impl Default for FailingTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for FailingTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> Result<(), StoreError> {
        if self.fail_insert {
            return Err(StoreError::storage("mock insert failure"));
        }
        self.inner.insert(token).await
    }

    async fn find_valid(&self, user_id: i64, token: &str) -> Result<Option<i64>, StoreError> {
        if self.fail_find_valid {
            return Err(StoreError::storage("mock lookup failure"));
        }
        self.inner.find_valid(user_id, token).await
    }

    async fn find_latest(&self, user_id: i64) -> Result<Option<RefreshToken>, StoreError> {
        if self.fail_find_latest {
            return Err(StoreError::storage("mock latest-lookup failure"));
        }
        self.inner.find_latest(user_id).await
    }

    async fn delete_issued_before(&self, cutoff_unix: i64) -> Result<u64, StoreError> {
        if self.fail_delete {
            return Err(StoreError::cleanup("mock delete failure"));
        }
        self.inner.delete_issued_before(cutoff_unix).await
    }
}
