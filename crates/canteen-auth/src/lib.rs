//! # canteen-auth
//!
//! Session-based authentication for the canteen backend.
//!
//! ## Modules
//!
//! - `password`: salted password digests and credential verification
//! - `jwt`: access token issuing and validation
//! - `session`: refresh token storage, the session lifecycle, and cleanup
//! - `gate`: bearer token authentication for inbound requests
//! - `bootstrap`: first-run administrator seeding

pub mod bootstrap;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;

pub use gate::AuthGate;
pub use identity::Identity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{CredentialVerifier, PasswordHasher};
pub use session::{SessionCleanup, SessionManager, SessionStore};
