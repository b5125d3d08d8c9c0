//! Connection pool construction from database configuration

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use tv_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Build a MySQL connection pool from the configured limits.
///
/// The pool supports concurrent use from arbitrary numbers of request
/// tasks plus the reaper task without external locking.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "database pool connected"
    );
    Ok(pool)
}
