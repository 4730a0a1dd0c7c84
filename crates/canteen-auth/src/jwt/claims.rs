//! JWT claims embedded in every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Identity;

/// Access token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user ID.
    pub user_id: i64,
    /// The user's role ID at the time of issuance.
    pub user_role_id: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the identity carried by these claims.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            role_id: self.user_role_id,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the token is still valid at `now`, allowing `leeway_seconds` of skew.
    pub fn is_live_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        now.timestamp() < self.exp.saturating_add(leeway_seconds)
    }
}
