//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use canteen_auth::jwt::JwtDecoder;
use canteen_auth::{AuthGate, SessionManager};
use canteen_core::config::AppConfig;
use canteen_core::error::AppError;
use canteen_core::traits::Clock;
use canteen_database::{AccountRepository, RefreshTokenRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Bearer token authentication
    pub auth_gate: Arc<AuthGate>,
    /// Account and role lookup
    pub accounts: Arc<dyn AccountRepository>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_manager", &self.session_manager)
            .field("auth_gate", &self.auth_gate)
            .finish()
    }
}

impl AppState {
    /// Wires the auth components over the given repositories.
    pub fn new(
        config: AppConfig,
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn RefreshTokenRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let session_manager = Arc::new(SessionManager::from_config(
            &config.auth,
            Arc::clone(&accounts),
            sessions,
            Arc::clone(&clock),
        )?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, clock)?);
        let auth_gate = Arc::new(AuthGate::new(jwt_decoder));

        Ok(Self {
            config: Arc::new(config),
            session_manager,
            auth_gate,
            accounts,
        })
    }
}
