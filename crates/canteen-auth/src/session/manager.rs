//! Session lifecycle manager: sign-in, refresh, and sign-out flows.

use std::sync::Arc;

use tracing::{info, warn};

use canteen_core::config::AuthConfig;
use canteen_core::error::{AppError, ErrorKind};
use canteen_core::traits::Clock;
use canteen_database::{AccountRepository, RefreshTokenRepository};
use canteen_entity::session::TokenPair;

use crate::identity::Identity;
use crate::jwt::JwtEncoder;
use crate::password::{CredentialVerifier, PasswordHasher};

use super::store::SessionStore;

/// Message returned for every failed sign-in, whatever the cause.
const SIGN_IN_FAILED: &str = "Invalid username or password";

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// Credential checks for sign-in.
    verifier: Arc<CredentialVerifier>,
    /// Access token issuing.
    jwt_encoder: Arc<JwtEncoder>,
    /// Refresh token persistence.
    session_store: Arc<SessionStore>,
    /// Account lookup on refresh.
    accounts: Arc<dyn AccountRepository>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("jwt_encoder", &self.jwt_encoder)
            .field("session_store", &self.session_store)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager from its collaborators.
    pub fn new(
        verifier: Arc<CredentialVerifier>,
        jwt_encoder: Arc<JwtEncoder>,
        session_store: Arc<SessionStore>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            verifier,
            jwt_encoder,
            session_store,
            accounts,
        }
    }

    /// Wires a session manager from configuration and repositories.
    pub fn from_config(
        config: &AuthConfig,
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn RefreshTokenRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::new(config));
        let verifier = Arc::new(CredentialVerifier::new(accounts.clone(), hasher));
        let jwt_encoder = Arc::new(JwtEncoder::new(config, clock.clone())?);
        let session_store = Arc::new(SessionStore::new(sessions, config, clock)?);

        Ok(Self::new(verifier, jwt_encoder, session_store, accounts))
    }

    /// Returns the underlying session store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.session_store
    }

    /// Verifies credentials and opens a new session.
    ///
    /// Unknown users, wrong passwords, and deactivated accounts all fail
    /// with the same `InvalidCredentials` error.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let identity = match self.verifier.verify(username, password).await {
            Ok(identity) => identity,
            Err(e)
                if matches!(
                    e.kind,
                    ErrorKind::AccountNotFound
                        | ErrorKind::InvalidCredentials
                        | ErrorKind::AccountDisabled
                ) =>
            {
                warn!(username = %username, reason = %e.kind, "Sign-in rejected");
                return Err(AppError::invalid_credentials(SIGN_IN_FAILED));
            }
            Err(e) => return Err(e),
        };

        let tokens = self.create_session(identity).await?;
        info!(user_id = %identity.user_id, "Sign-in successful");
        Ok(tokens)
    }

    /// Issues an access token and stores a new refresh token for `identity`.
    ///
    /// A signing failure stores no refresh token.
    pub async fn create_session(&self, identity: Identity) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self
            .jwt_encoder
            .issue(identity.user_id, identity.role_id)?;

        let (refresh_token, refresh_expires_at) =
            self.session_store.create(identity.user_id).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// The presented token is consumed before anything else is checked, so
    /// it can never be used twice, even when the refresh then fails.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let session = self.session_store.consume(refresh_token).await?;

        if self.session_store.is_expired(&session) {
            info!(user_id = %session.user_id, session_id = %session.id, "Refresh token expired");
            return Err(AppError::token_expired("Refresh token has expired"));
        }

        let user = self
            .accounts
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::account_not_found("Account no longer exists"))?;

        if !user.can_login() {
            warn!(user_id = %user.id, "Refresh rejected for deactivated account");
            return Err(AppError::account_disabled("Account is deactivated"));
        }

        let tokens = self
            .create_session(Identity {
                user_id: user.id,
                role_id: user.role_id,
            })
            .await?;

        info!(user_id = %user.id, previous_session_id = %session.id, "Session refreshed");
        Ok(tokens)
    }

    /// Ends the session owning `refresh_token`.
    ///
    /// Access tokens already issued stay valid until they expire.
    pub async fn sign_out(&self, refresh_token: &str) -> Result<(), AppError> {
        let session = self.session_store.lookup(refresh_token).await?;
        self.session_store.delete(refresh_token).await?;

        info!(user_id = %session.user_id, session_id = %session.id, "Signed out");
        Ok(())
    }
}
