//! Access token creation with the configured key and lifetime.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use canteen_core::config::AuthConfig;
use canteen_core::error::AppError;
use canteen_core::traits::Clock;

use super::claims::Claims;

/// Signs access tokens with HMAC-SHA256.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Source of the issuance time.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails with a configuration error if the signing key is empty.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        if config.signing_key.is_empty() {
            return Err(AppError::configuration("Access token signing key is not set"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.signing_key.as_bytes()),
            access_ttl: config.access_ttl()?,
            clock,
        })
    }

    /// Issues an access token for the given user and role.
    ///
    /// Returns the token and its absolute expiry.
    pub fn issue(&self, user_id: i64, role_id: i64) -> Result<(String, DateTime<Utc>), AppError> {
        let now = self.clock.now();
        let exp = (now + self.access_ttl).timestamp();

        let claims = Claims {
            user_id,
            user_role_id: role_id,
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, claims.expires_at()))
    }
}
