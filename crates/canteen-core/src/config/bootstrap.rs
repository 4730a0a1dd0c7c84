//! First-run seeding configuration.

use serde::{Deserialize, Serialize};

/// Seeding performed once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Administrator account created when no user with that name exists.
    #[serde(default)]
    pub admin: Option<AdminAccountConfig>,
}

/// Initial administrator account.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminAccountConfig {
    /// Login name.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Email address.
    pub email: String,
    /// Given name.
    #[serde(default = "default_first_name")]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Name of the role to assign.
    #[serde(default = "default_role")]
    pub role: String,
}

impl std::fmt::Debug for AdminAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccountConfig")
            .field("username", &self.username)
            .field("password", &"****")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

fn default_first_name() -> String {
    "Administrator".to_string()
}

fn default_role() -> String {
    "admin".to_string()
}
