//! Authentication configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Ceiling for token lifetimes and leeway: one year.
pub const MAX_LIFETIME_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Credential and token configuration.
///
/// Built once at startup and handed to the password hasher, the JWT
/// encoder/decoder, and the refresh token store.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256). Required.
    #[serde(default)]
    pub signing_key: String,
    /// Process-wide secret salt mixed into password digests.
    #[serde(default)]
    pub password_salt: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Clock skew tolerated when checking access token expiry, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            password_salt: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            leeway_seconds: 0,
        }
    }
}

impl AuthConfig {
    /// Access token lifetime.
    pub fn access_ttl(&self) -> Result<TimeDelta, AppError> {
        seconds("auth.access_token_ttl_seconds", self.access_token_ttl_seconds)
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Result<TimeDelta, AppError> {
        seconds("auth.refresh_token_ttl_seconds", self.refresh_token_ttl_seconds)
    }

    /// Tolerated clock skew.
    pub fn leeway(&self) -> Result<TimeDelta, AppError> {
        seconds("auth.leeway_seconds", self.leeway_seconds)
    }
}

fn seconds(field: &str, value: u64) -> Result<TimeDelta, AppError> {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| AppError::configuration(format!("{field} is out of range: {value}")))
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"****")
            .field("password_salt", &"****")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

fn default_access_ttl() -> u64 {
    120
}

fn default_refresh_ttl() -> u64 {
    600
}
