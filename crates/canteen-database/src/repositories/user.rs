//! User and role repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use canteen_core::error::{AppError, ErrorKind};
use canteen_core::result::AppResult;
use canteen_entity::user::{CreateUser, User, UserRole};

use crate::traits::AccountRepository;

const USER_COLUMNS: &str = "user_id, user_role_id, username, password, email, first_name, \
                            last_name, is_active, created_at, updated_at";

/// PostgreSQL-backed account lookup.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for UserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM \"user\" WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to find user by username", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM \"user\" WHERE user_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to find user by id", e))
    }

    async fn find_role_by_id(&self, role_id: i64) -> AppResult<Option<UserRole>> {
        sqlx::query_as::<_, UserRole>(
            "SELECT user_role_id, name FROM user_role WHERE user_role_id = $1",
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to find role by id", e))
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<UserRole>> {
        sqlx::query_as::<_, UserRole>("SELECT user_role_id, name FROM user_role WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to find role by name", e))
    }

    async fn create_user(&self, user: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO \"user\" (user_role_id, username, password, email, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.role_id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Store, "Failed to create user", e))
    }
}
