//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `token` - Credential signing and lifetime configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration

pub mod database;
pub mod environment;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use token::{ReaperConfig, TokenConfig, IMMINENT_EXPIRATION_FRACTION};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Credential signing and lifetime configuration
    pub token: TokenConfig,

    /// Expired-token reaper configuration
    pub reaper: ReaperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            token: TokenConfig::default(),
            reaper: ReaperConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            database: DatabaseConfig::from_env(),
            token: TokenConfig::from_env(),
            reaper: ReaperConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
