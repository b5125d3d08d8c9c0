//! Token lifecycle module
//!
//! This module handles all token-related operations:
//! - Signed-token encoding and verification (access and refresh tokens)
//! - Refresh token minting, persistence, and two-phase validation
//! - Near-end-of-life rotation
//! - Background cleanup of expired refresh-token rows

mod codec;
mod reaper;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use reaper::{ExpiryReaper, ReaperHandle};
pub use service::TokenService;

// Configuration lives in the shared crate; re-exported here so callers can
// construct the services without a tv_shared import.
pub use tv_shared::config::{ReaperConfig, TokenConfig};
