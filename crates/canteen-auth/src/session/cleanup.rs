//! Periodic removal of expired refresh sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use canteen_core::error::AppError;

use super::store::SessionStore;

/// Deletes refresh sessions whose expiry has passed.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Session store to sweep.
    session_store: Arc<SessionStore>,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(session_store: Arc<SessionStore>) -> Self {
        Self { session_store }
    }

    /// Runs one cleanup cycle.
    ///
    /// Returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.session_store.delete_expired().await?;

        if removed > 0 {
            info!(removed = removed, "Expired sessions cleaned up");
        } else {
            debug!("No expired sessions to clean up");
        }

        Ok(removed)
    }

    /// Spawns a background task running [`Self::run_cleanup`] every `every`.
    pub fn spawn(self, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "Session cleanup failed");
                }
            }
        })
    }
}
