//! Refresh session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use canteen_core::error::{AppError, ErrorKind};
use canteen_core::result::AppResult;
use canteen_entity::session::RefreshSession;

use crate::traits::RefreshTokenRepository;

const SESSION_COLUMNS: &str = "session_id, user_id, refresh_token_hash, expires_at, created_at";

/// PostgreSQL-backed refresh session storage.
///
/// Consumption relies on `DELETE ... RETURNING`, which is atomic under the
/// default read-committed isolation: two concurrent deletes of the same
/// row cannot both return it.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for SessionRepository {
    async fn insert(&self, session: &RefreshSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO session (session_id, user_id, refresh_token_hash, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.refresh_token_hash)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to create session", e))?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM session WHERE refresh_token_hash = $1"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Store,
                "Failed to find session by refresh token",
                e,
            )
        })
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM session WHERE refresh_token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to delete session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn take_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>(&format!(
            "DELETE FROM session WHERE refresh_token_hash = $1 RETURNING {SESSION_COLUMNS}"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to consume session", e))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Store, "Failed to delete expired sessions", e)
            })?;

        Ok(result.rows_affected())
    }
}
