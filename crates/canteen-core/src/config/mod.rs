//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The merged [`AppConfig`] is built once at startup and passed
//! down by reference; nothing reads the process environment afterwards.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_LIFETIME_SECONDS};
pub use self::bootstrap::{AdminAccountConfig, BootstrapConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `CANTEEN_AUTH__SIGNING_KEY`.
const ENV_PREFIX: &str = "CANTEEN";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Refresh session housekeeping.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// First-run seeding.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with
    /// `CANTEEN_`, then validates the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::from_config(config)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::from_config(config)
    }

    fn from_config(config: config::Config) -> Result<Self, AppError> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.signing_key.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.signing_key is required (set CANTEEN_AUTH__SIGNING_KEY)",
            ));
        }

        if self.auth.access_token_ttl_seconds == 0 || self.auth.refresh_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "Token lifetimes must be greater than zero",
            ));
        }

        for (field, value) in [
            ("access_token_ttl_seconds", self.auth.access_token_ttl_seconds),
            ("refresh_token_ttl_seconds", self.auth.refresh_token_ttl_seconds),
            ("leeway_seconds", self.auth.leeway_seconds),
        ] {
            if value > MAX_LIFETIME_SECONDS {
                return Err(AppError::configuration(format!(
                    "auth.{field} must not exceed {MAX_LIFETIME_SECONDS} seconds"
                )));
            }
        }

        if self.auth.access_token_ttl_seconds >= self.auth.refresh_token_ttl_seconds {
            return Err(AppError::configuration(
                "auth.access_token_ttl_seconds must be shorter than auth.refresh_token_ttl_seconds",
            ));
        }

        if let Some(admin) = &self.bootstrap.admin {
            if admin.username.trim().is_empty() || admin.password.is_empty() {
                return Err(AppError::configuration(
                    "bootstrap.admin requires a username and a password",
                ));
            }
        }

        Ok(())
    }
}
