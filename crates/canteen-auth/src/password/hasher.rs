//! HMAC-SHA256 password digests keyed with the process-wide salt.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use canteen_core::config::AuthConfig;
use canteen_core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Computes and checks salted password digests.
///
/// Every digest is `hex(HMAC-SHA256(key = password_salt, msg = password))`.
#[derive(Clone)]
pub struct PasswordHasher {
    /// Secret salt shared by all digests.
    salt: Vec<u8>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Creates a hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_salt(&config.password_salt)
    }

    /// Creates a hasher with an explicit salt.
    pub fn with_salt(salt: &str) -> Self {
        Self {
            salt: salt.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.salt)
            .map_err(|e| AppError::internal(format!("Failed to initialise password MAC: {e}")))
    }

    /// Returns the hex digest of `password`.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks `password` against a stored hex digest in constant time.
    ///
    /// A stored value that is not valid hex never matches.
    pub fn matches(&self, password: &str, digest: &str) -> Result<bool, AppError> {
        let Ok(expected) = hex::decode(digest) else {
            tracing::warn!("Stored password digest is not valid hex");
            return Ok(false);
        };

        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(mac.verify_slice(&expected).is_ok())
    }
}
