//! Shared utilities and common types for TokenVault server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types with environment loaders
//! - Environment detection and logging setup
//! - The clock abstraction used by time-dependent services

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LoggingConfig, ReaperConfig, TokenConfig,
    IMMINENT_EXPIRATION_FRACTION,
};
pub use utils::clock::{Clock, ManualClock, SystemClock};
