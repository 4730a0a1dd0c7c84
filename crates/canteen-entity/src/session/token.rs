//! Token pair returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An access token and a refresh token issued together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: String,
    /// Long-lived opaque refresh token (single use).
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}
