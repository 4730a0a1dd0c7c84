//! The authenticated principal attached to a request.

use serde::{Deserialize, Serialize};

/// User and role carried by a valid access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Authenticated user ID.
    pub user_id: i64,
    /// Role ID at the time the token was issued.
    pub role_id: i64,
}
