//! Periodic cleanup of expired refresh-token rows
//!
//! The reaper bounds growth of the refresh-token table. It shares nothing
//! with request handling except the repository; a missed sweep is never
//! fatal because the next tick catches up.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use tv_shared::config::ReaperConfig;
use tv_shared::utils::clock::Clock;

use crate::errors::DomainResult;
use crate::repositories::TokenRepository;

/// Background task deleting refresh-token rows past their lifetime
pub struct ExpiryReaper<R: TokenRepository> {
    repository: Arc<R>,
    config: ReaperConfig,
    /// Lifetime of a refresh token in seconds. Governs which rows are dead;
    /// the sweep interval only governs how promptly they are reclaimed.
    refresh_token_lifetime_secs: i64,
    clock: Arc<dyn Clock>,
}

impl<R: TokenRepository + 'static> ExpiryReaper<R> {
    /// Create a new expiry reaper
    pub fn new(
        repository: Arc<R>,
        config: ReaperConfig,
        refresh_token_lifetime_secs: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            config,
            refresh_token_lifetime_secs,
            clock,
        }
    }

    /// Run a single deterministic sweep.
    ///
    /// Deletes every row issued before `now - refresh_token_lifetime`; such
    /// rows would fail validation anyway, so reaping them changes nothing a
    /// caller can observe.
    pub async fn sweep_once(&self) -> DomainResult<u64> {
        let cutoff = self.clock.now_unix() - self.refresh_token_lifetime_secs;
        match self.repository.delete_issued_before(cutoff).await {
            Ok(deleted) => {
                info!(deleted, "expiry sweep deleted expired refresh tokens");
                Ok(deleted)
            }
            Err(err) => {
                error!(operation = "delete_issued_before", "expiry sweep failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Start sweeping on the configured interval as a background task.
    ///
    /// The returned handle stops the task as part of graceful shutdown.
    /// Sweep failures are logged and swallowed; the loop never crashes the
    /// host process.
    pub fn start(self: Arc<Self>) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        if !self.config.enabled {
            warn!("expiry reaper is disabled; expired refresh token rows will not be reclaimed");
            return ReaperHandle {
                shutdown: shutdown_tx,
                task: None,
            };
        }

        let interval = Duration::from_secs(self.config.sweep_interval_secs);
        let task = tokio::spawn(async move {
            info!(
                interval_secs = self.config.sweep_interval_secs,
                "expiry reaper started"
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Failure already logged; the next tick catches up.
                        let _ = self.sweep_once().await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!("expiry reaper stopping");
                        break;
                    }
                }
            }
        });

        ReaperHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle for stopping a running reaper
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReaperHandle {
    /// Signal the reaper to stop and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task {
            let _ = task.await;
        }
    }
}
