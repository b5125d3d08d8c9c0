//! Credential signing and lifetime configuration

use serde::{Deserialize, Serialize};

/// Share of the refresh-token lifetime treated as the imminent-expiration
/// window. A token whose remaining lifetime drops below this fraction of the
/// full lifetime is near end of life and callers should rotate it.
pub const IMMINENT_EXPIRATION_FRACTION: f64 = 0.20;

const DEFAULT_SIGNING_KEY: &str = "development-signing-key-change-in-production";

/// Signing key and lifetimes for issued credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Symmetric key for the HMAC token signature. Must be non-empty;
    /// the codec refuses to start without one.
    pub signing_key: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            signing_key: String::from(DEFAULT_SIGNING_KEY),
            access_token_ttl_secs: 900,            // 15 minutes
            refresh_token_lifetime_secs: 604_800,  // 7 days
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with a signing key
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            ..Default::default()
        }
    }

    /// Load from environment variables. `TOKEN_SIGNING_KEY` has no fallback
    /// in production; an unset key yields an empty string which fails fast
    /// when the codec is constructed.
    pub fn from_env() -> Self {
        let signing_key = match std::env::var("TOKEN_SIGNING_KEY") {
            Ok(key) => key,
            Err(_) if super::Environment::from_env().is_production() => String::new(),
            Err(_) => String::from(DEFAULT_SIGNING_KEY),
        };
        let access_token_ttl_secs = std::env::var("ACCESS_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);
        let refresh_token_lifetime_secs = std::env::var("REFRESH_TOKEN_LIFETIME_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604_800);

        Self {
            signing_key,
            access_token_ttl_secs,
            refresh_token_lifetime_secs,
        }
    }

    /// Set the access token lifetime in seconds
    pub fn with_access_ttl_secs(mut self, secs: i64) -> Self {
        self.access_token_ttl_secs = secs;
        self
    }

    /// Set the refresh token lifetime in seconds
    pub fn with_refresh_lifetime_secs(mut self, secs: i64) -> Self {
        self.refresh_token_lifetime_secs = secs;
        self
    }

    /// Remaining-lifetime threshold below which a refresh token is near
    /// end of life, in seconds
    pub fn imminent_expiration_window_secs(&self) -> i64 {
        (self.refresh_token_lifetime_secs as f64 * IMMINENT_EXPIRATION_FRACTION) as i64
    }

    /// Check if using the default signing key (security warning)
    pub fn is_using_default_key(&self) -> bool {
        self.signing_key == DEFAULT_SIGNING_KEY
    }
}

/// Schedule for the background sweep that deletes expired refresh-token rows
///
/// The sweep interval governs how promptly storage is reclaimed, not token
/// validity; it is deliberately independent from the token lifetimes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaperConfig {
    /// How often to sweep, in seconds
    pub sweep_interval_secs: u64,

    /// Whether the background sweep runs at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 3600, // hourly
            enabled: default_enabled(),
        }
    }
}

impl ReaperConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let sweep_interval_secs = std::env::var("REAPER_SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);
        let enabled = std::env::var("REAPER_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            sweep_interval_secs,
            enabled,
        }
    }
}

fn default_enabled() -> bool {
    true
}
