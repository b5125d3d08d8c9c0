//! Stateless encode/verify of the compact signed-token wire format
//!
//! Access and refresh tokens share this codec: three dot-separated base64url
//! segments (header, payload, signature), the payload carrying
//! `{user_id, iat, exp}`, the signature an HMAC-SHA256 over header+payload
//! with the configured symmetric key.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

/// Codec holding the signing key material, built once at startup
///
/// No side effects and no interior mutability; safe to share across any
/// number of concurrent callers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec from the configured symmetric signing key.
    ///
    /// An unset key is a fatal configuration error surfaced here, at
    /// startup, rather than per-request.
    pub fn new(signing_key: &str) -> Result<Self, DomainError> {
        if signing_key.is_empty() {
            return Err(DomainError::Configuration {
                message: "token signing key is not set".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a policy decision made by the caller, not the codec:
        // refresh tokens are re-validated against the store independent of
        // the embedded claim, and access-token expiry is enforced by the
        // lifecycle service.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation,
        })
    }

    /// Signs a token binding `user_id` to an issuance window.
    ///
    /// Deterministic given inputs and key.
    pub fn encode(
        &self,
        user_id: i64,
        issued_at: i64,
        expires_at: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, issued_at, expires_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::MintFailed)
    }

    /// Parses and verifies a token string, returning the claims.
    ///
    /// Succeeds even when `exp` is in the past. Fails with
    /// `InvalidSignature` when the signature does not match the key and
    /// `Malformed` when the structure cannot be parsed.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
