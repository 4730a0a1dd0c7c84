//! Repository interfaces consumed by the auth core.
//!
//! Lookups return `Ok(None)` for absent rows; callers decide whether
//! absence is an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use canteen_core::result::AppResult;
use canteen_entity::session::RefreshSession;
use canteen_entity::user::{CreateUser, User, UserRole};

/// Read access to user accounts and roles.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a role by primary key.
    async fn find_role_by_id(&self, role_id: i64) -> AppResult<Option<UserRole>>;

    /// Find a role by its unique name.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<UserRole>>;

    /// Insert a new user and return the stored row.
    async fn create_user(&self, user: &CreateUser) -> AppResult<User>;
}

/// Persistence for refresh sessions, keyed by refresh token hash.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new session row. Fails if the token hash already exists.
    async fn insert(&self, session: &RefreshSession) -> AppResult<()>;

    /// Find a session by refresh token hash.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>>;

    /// Delete a session by refresh token hash. Returns `true` if a row was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool>;

    /// Atomically delete a session and return the removed row.
    ///
    /// Of several concurrent callers presenting the same hash, at most one
    /// receives `Some`.
    async fn take_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>>;

    /// Delete every session whose expiry is at or before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
