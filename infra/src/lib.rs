//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for TokenVault. It
//! provides the concrete MySQL-backed implementation of the core
//! repository traits plus connection-pool construction and env-driven
//! bootstrap.
//!
//! Concurrency safety is delegated to the SQLx pool and the database's
//! row-level isolation; nothing in this crate takes additional locks.

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{connect_pool, MySqlTokenRepository};

use tv_shared::config::{AppConfig, DatabaseConfig};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Load application configuration from the environment.
///
/// Reads a `.env` file when present, then the process environment.
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Connect the database pool and build the token repository.
///
/// The pool is the only shared mutable resource in the system; the
/// returned repository can be handed to any number of request tasks plus
/// the expiry reaper.
pub async fn initialize(
    config: &DatabaseConfig,
) -> Result<MySqlTokenRepository, InfrastructureError> {
    tracing::info!("initializing infrastructure services");

    let pool = connect_pool(config).await?;
    let repository = MySqlTokenRepository::new(pool);
    repository.ensure_schema().await?;

    tracing::info!("infrastructure services initialized");
    Ok(repository)
}
