//! Session housekeeping configuration.

use serde::{Deserialize, Serialize};

/// Refresh session housekeeping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How often expired refresh sessions are purged, in seconds (0 disables the sweeper).
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

fn default_cleanup_interval() -> u64 {
    300
}
