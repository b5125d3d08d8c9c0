//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool construction from configuration
//! - Repository implementations

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::connect_pool;
pub use mysql::MySqlTokenRepository;
