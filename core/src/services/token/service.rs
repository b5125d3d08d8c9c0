//! Main token lifecycle service implementation

use std::sync::Arc;

use tracing::{error, warn};

use tv_shared::config::TokenConfig;
use tv_shared::utils::clock::Clock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;

/// Service owning the business rules of the token lifecycle
///
/// The only component the request layer interacts with directly: minting,
/// two-phase refresh validation, and near-end-of-life rotation all live
/// here. Storage and signature work are delegated to the repository and the
/// codec.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    pub(crate) codec: TokenCodec,
    config: TokenConfig,
    clock: Arc<dyn Clock>,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance.
    ///
    /// Fails with a configuration error when the signing key is unset; the
    /// process must not start serving traffic in that state.
    pub fn new(
        repository: R,
        config: TokenConfig,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let codec = TokenCodec::new(&config.signing_key)?;
        Ok(Self {
            repository,
            codec,
            config,
            clock,
        })
    }

    /// Mints a short-lived stateless access token for a user.
    ///
    /// Never persisted, never looked up; validity is the signature plus the
    /// embedded expiry at presentation time.
    pub fn mint_access_token(&self, user_id: i64) -> DomainResult<String> {
        let now = self.clock.now_unix();
        let token = self
            .codec
            .encode(user_id, now, now + self.config.access_token_ttl_secs)?;
        Ok(token)
    }

    /// Mints a refresh token and persists it.
    ///
    /// On store failure the error is returned and no token: a failed mint
    /// must never be handed out as a usable credential.
    pub async fn mint_refresh_token(&self, user_id: i64) -> DomainResult<String> {
        let now = self.clock.now_unix();
        let signed = self
            .codec
            .encode(user_id, now, now + self.config.refresh_token_lifetime_secs)?;
        let token = RefreshToken::new(signed, user_id, now);

        if let Err(err) = self.repository.insert(&token).await {
            error!(user_id, operation = "insert", "could not store refresh token: {err}");
            return Err(err.into());
        }
        Ok(token.token)
    }

    /// Parses a presented refresh-token string into its entity form.
    ///
    /// Signature and structure are checked here; expiry and store
    /// confirmation happen in [`validate_refresh_token`].
    ///
    /// [`validate_refresh_token`]: TokenService::validate_refresh_token
    pub fn refresh_token_from_str(&self, token_str: &str) -> DomainResult<RefreshToken> {
        let claims = self.codec.decode(token_str)?;
        Ok(RefreshToken::new(token_str, claims.user_id, claims.iat))
    }

    /// Validates a presented refresh token in two phases.
    ///
    /// 1. Local expiry check: an expired token fails immediately with
    ///    `RefreshTokenExpired` without touching the store. A token inside
    ///    the imminent-expiration window is flagged near end of life on the
    ///    entity but still validates.
    /// 2. Store confirmation: a missing row (revoked or reaped, the two are
    ///    indistinguishable) fails with `RefreshTokenInvalid`.
    pub async fn validate_refresh_token(
        &self,
        token: &mut RefreshToken,
    ) -> DomainResult<()> {
        self.check_refresh_token_expiry(token)?;

        match self.repository.find_valid(token.user_id, &token.token).await {
            Ok(Some(issued_at)) => {
                // The stored row is authoritative for issuance time.
                token.issued_at = issued_at;
                Ok(())
            }
            Ok(None) => {
                warn!(
                    user_id = token.user_id,
                    "no stored row matched the presented refresh token"
                );
                Err(TokenError::RefreshTokenInvalid.into())
            }
            Err(err) => {
                error!(
                    user_id = token.user_id,
                    operation = "find_valid",
                    "refresh token lookup failed: {err}"
                );
                Err(err.into())
            }
        }
    }

    /// Sets the end-of-life flag for the token; returns an error if the
    /// token is expired. `remaining == 0` counts as expired.
    fn check_refresh_token_expiry(&self, token: &mut RefreshToken) -> DomainResult<()> {
        let remaining = token.remaining_lifetime_secs(
            self.config.refresh_token_lifetime_secs,
            self.clock.now_unix(),
        );
        if remaining < self.config.imminent_expiration_window_secs() {
            token.mark_near_end_of_life();
            if remaining <= 0 {
                return Err(TokenError::RefreshTokenExpired.into());
            }
        }
        Ok(())
    }

    /// Returns the user's latest refresh token, minting a new one only when
    /// none exists or the latest is inside the imminent-expiration window.
    ///
    /// Reusing a token with ample life left avoids one-new-row-per-refresh
    /// under steady traffic. The read-then-mint sequence is deliberately not
    /// transactional: two concurrent callers may both mint, which only
    /// leaves a second valid row (multi-device is a supported state).
    pub async fn get_or_create_refresh_token(&self, user_id: i64) -> DomainResult<String> {
        match self.repository.find_latest(user_id).await {
            Ok(Some(latest)) => {
                let remaining = latest.remaining_lifetime_secs(
                    self.config.refresh_token_lifetime_secs,
                    self.clock.now_unix(),
                );
                if remaining > self.config.imminent_expiration_window_secs() {
                    return Ok(latest.token);
                }
            }
            Ok(None) => {}
            Err(err) => {
                // A failed read must not block issuance; mint a fresh token.
                warn!(
                    user_id,
                    operation = "find_latest",
                    "could not load latest refresh token: {err}"
                );
            }
        }
        self.mint_refresh_token(user_id).await
    }

    /// Verifies an access token and returns the user id inside it.
    ///
    /// Unlike refresh tokens there is no store to consult: the signature and
    /// the embedded expiry are the whole story.
    pub fn verify_access_token(&self, token_str: &str) -> DomainResult<i64> {
        let claims = self.codec.decode(token_str)?;
        if claims.is_expired_at(self.clock.now_unix()) {
            return Err(TokenError::AccessTokenExpired.into());
        }
        Ok(claims.user_id)
    }
}
