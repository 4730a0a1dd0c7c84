//! Refresh token persistence wrapping the session repository.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use canteen_core::config::AuthConfig;
use canteen_core::error::AppError;
use canteen_core::traits::Clock;
use canteen_database::RefreshTokenRepository;
use canteen_entity::session::RefreshSession;

use super::token::{generate_refresh_token, hash_refresh_token};

/// Issues, looks up and revokes opaque refresh tokens.
///
/// Only the SHA-256 digest of each token is handed to the repository.
#[derive(Clone)]
pub struct SessionStore {
    /// Session repository.
    repo: Arc<dyn RefreshTokenRepository>,
    /// Source of the current time.
    clock: Arc<dyn Clock>,
    /// Refresh token lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    /// Creates a new session store.
    ///
    /// Fails with a configuration error if the refresh lifetime is out of range.
    pub fn new(
        repo: Arc<dyn RefreshTokenRepository>,
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            repo,
            clock,
            ttl: config.refresh_ttl()?,
        })
    }

    /// Stores a fresh refresh token for `user_id`.
    ///
    /// Returns the opaque token value and its expiry. The value is not
    /// recoverable from the store afterwards.
    pub async fn create(&self, user_id: i64) -> Result<(String, DateTime<Utc>), AppError> {
        let now = self.clock.now();
        let token = generate_refresh_token();

        let session = RefreshSession {
            id: Uuid::new_v4(),
            user_id,
            refresh_token_hash: hash_refresh_token(&token),
            expires_at: now + self.ttl,
            created_at: now,
        };

        self.repo.insert(&session).await?;

        Ok((token, session.expires_at))
    }

    /// Finds the session for a refresh token.
    pub async fn lookup(&self, token: &str) -> Result<RefreshSession, AppError> {
        self.repo
            .find_by_token_hash(&hash_refresh_token(token))
            .await?
            .ok_or_else(|| AppError::token_not_found("Refresh token not found"))
    }

    /// Deletes the session for a refresh token. Deleting an unknown token is not an error.
    pub async fn delete(&self, token: &str) -> Result<bool, AppError> {
        self.repo
            .delete_by_token_hash(&hash_refresh_token(token))
            .await
    }

    /// Atomically removes and returns the session for a refresh token.
    ///
    /// Of several concurrent callers with the same token at most one succeeds.
    pub async fn consume(&self, token: &str) -> Result<RefreshSession, AppError> {
        self.repo
            .take_by_token_hash(&hash_refresh_token(token))
            .await?
            .ok_or_else(|| AppError::token_not_found("Refresh token not found"))
    }

    /// Whether `session` has passed its expiry.
    pub fn is_expired(&self, session: &RefreshSession) -> bool {
        session.is_expired_at(self.clock.now())
    }

    /// Deletes every expired session. Returns the number removed.
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired(self.clock.now()).await
    }
}
