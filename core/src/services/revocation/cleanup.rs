//! Periodic sweep of stale revocation entries
//!
//! Lookups already prune the entries they touch. The sweep bounds memory for
//! tokens that are revoked and never presented again.

use std::sync::Arc;
use std::time::Duration;

use tg_shared::config::JwtConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::store::RevocationStore;

/// Configuration for the revocation sweep
#[derive(Debug, Clone)]
pub struct RevocationSweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the sweep at all
    pub enabled: bool,
}

impl Default for RevocationSweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: false,
        }
    }
}

impl From<&JwtConfig> for RevocationSweepConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweep_enabled(),
        }
    }
}

/// Removes stale entries from a shared [`RevocationStore`] on a timer
pub struct RevocationSweeper {
    store: Arc<RevocationStore>,
    config: RevocationSweepConfig,
}

impl RevocationSweeper {
    pub fn new(store: Arc<RevocationStore>, config: RevocationSweepConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep
    ///
    /// # Returns
    ///
    /// Number of entries removed
    pub fn run_once(&self) -> usize {
        let removed = self.store.purge_expired();
        debug!(removed, remaining = self.store.len(), "Revocation sweep completed");
        removed
    }

    /// Start the sweep as a background task
    ///
    /// Returns `None` without spawning when the sweep is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled || self.config.interval_seconds == 0 {
            warn!("Revocation sweep is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Revocation sweep started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let removed = self.run_once();
                if removed > 0 {
                    info!("Removed {} stale revocation entries", removed);
                }
            }
        }))
    }
}
