//! In-memory repositories backed by `DashMap`.
//!
//! Used by tests and local tooling where no PostgreSQL instance is
//! available. Semantics match the SQL implementations, including the
//! atomicity of [`RefreshTokenRepository::take_by_token_hash`].

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use canteen_core::error::AppError;
use canteen_core::result::AppResult;
use canteen_entity::session::RefreshSession;
use canteen_entity::user::{CreateUser, User, UserRole};

use crate::traits::{AccountRepository, RefreshTokenRepository};

/// In-memory user and role storage.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<i64, User>,
    roles: DashMap<i64, UserRole>,
    next_user_id: AtomicI64,
    next_role_id: AtomicI64,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role and returns it.
    pub fn insert_role(&self, name: &str) -> UserRole {
        let role = UserRole {
            id: self.next_role_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
        };
        self.roles.insert(role.id, role.clone());
        role
    }

    /// Removes a role. Users referencing it are left untouched.
    pub fn remove_role(&self, role_id: i64) -> bool {
        self.roles.remove(&role_id).is_some()
    }

    /// Removes a user. Returns `true` if it existed.
    pub fn remove_user(&self, user_id: i64) -> bool {
        self.users.remove(&user_id).is_some()
    }

    /// Reassigns a user's role.
    pub fn set_role(&self, user_id: i64, role_id: i64) -> bool {
        match self.users.get_mut(&user_id) {
            Some(mut user) => {
                user.role_id = role_id;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Activates or deactivates a user.
    pub fn set_active(&self, user_id: i64, active: bool) -> bool {
        match self.users.get_mut(&user_id) {
            Some(mut user) => {
                user.is_active = active;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl AccountRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_role_by_id(&self, role_id: i64) -> AppResult<Option<UserRole>> {
        Ok(self.roles.get(&role_id).map(|entry| entry.value().clone()))
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<UserRole>> {
        Ok(self
            .roles
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value().clone()))
    }

    async fn create_user(&self, user: &CreateUser) -> AppResult<User> {
        if self.users.iter().any(|entry| entry.username == user.username) {
            return Err(AppError::store(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let now = Utc::now();
        let created = User {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1,
            role_id: user.role_id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(created.id, created.clone());
        Ok(created)
    }
}

/// In-memory refresh session storage keyed by token hash.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    sessions: DashMap<String, RefreshSession>,
}

impl MemorySessionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of stored sessions owned by `user_id`.
    pub fn count_for_user(&self, user_id: i64) -> usize {
        self.sessions
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemorySessionRepository {
    async fn insert(&self, session: &RefreshSession) -> AppResult<()> {
        match self.sessions.entry(session.refresh_token_hash.clone()) {
            Entry::Occupied(_) => Err(AppError::store("Refresh token hash already exists")),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        Ok(self
            .sessions
            .get(token_hash)
            .map(|entry| entry.value().clone()))
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        Ok(self.sessions.remove(token_hash).is_some())
    }

    async fn take_by_token_hash(&self, token_hash: &str) -> AppResult<Option<RefreshSession>> {
        Ok(self.sessions.remove(token_hash).map(|(_, session)| session))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.sessions.retain(|_, session| {
            let keep = !session.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
