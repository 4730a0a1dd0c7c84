//! Username/password verification against stored accounts.

use std::sync::Arc;

use canteen_core::error::AppError;
use canteen_database::AccountRepository;
use crate::identity::Identity;

use super::hasher::PasswordHasher;

/// Checks submitted credentials against the account store.
#[derive(Clone)]
pub struct CredentialVerifier {
    /// Account lookup.
    accounts: Arc<dyn AccountRepository>,
    /// Digest computation.
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish()
    }
}

impl CredentialVerifier {
    /// Creates a new verifier.
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    /// Verifies a username/password pair and returns the account's identity.
    ///
    /// Fails with `AccountNotFound` when no such user exists,
    /// `InvalidCredentials` when the password does not match, and
    /// `AccountDisabled` when the password matches a deactivated account.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Identity, AppError> {
        let user = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::account_not_found(format!("No account named '{username}'")))?;

        if !self.hasher.matches(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials("Password does not match"));
        }

        if !user.can_login() {
            return Err(AppError::account_disabled("Account is deactivated"));
        }

        Ok(Identity {
            user_id: user.id,
            role_id: user.role_id,
        })
    }
}
