//! Refresh session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored refresh token.
///
/// One row exists per live session. The row is created at sign-in or
/// refresh and deleted on sign-out or on its next use; it is never
/// updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshSession {
    /// Unique session identifier.
    #[sqlx(rename = "session_id")]
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: i64,
    /// SHA-256 hex digest of the opaque refresh token value.
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,
    /// Absolute expiry of the refresh token.
    pub expires_at: DateTime<Utc>,
    /// When the session row was created.
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Check whether the refresh token has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
