//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered canteen user.
///
/// Rows are owned by the user-management side of the backend; the auth
/// core only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    #[sqlx(rename = "user_id")]
    pub id: i64,
    /// Role assigned to this user.
    #[sqlx(rename = "user_role_id")]
    pub role_id: i64,
    /// Unique login name.
    pub username: String,
    /// Salted password digest (hex).
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user can sign in or refresh right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Role to assign.
    pub role_id: i64,
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}
