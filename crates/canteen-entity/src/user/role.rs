//! User role entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named role. Users reference roles by id; the access token carries
/// only the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRole {
    /// Unique role identifier.
    #[sqlx(rename = "user_role_id")]
    pub id: i64,
    /// Unique role name, e.g. `"admin"` or `"cashier"`.
    pub name: String,
}
