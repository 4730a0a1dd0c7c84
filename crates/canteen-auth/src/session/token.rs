//! Opaque refresh token generation and hashing.

use sha2::{Digest, Sha256};

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates a new hex-encoded refresh token from the OS-seeded CSPRNG.
pub fn generate_refresh_token() -> String {
    let bytes: [u8; REFRESH_TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

/// SHA-256 hex digest of a refresh token, used as the storage key.
pub fn hash_refresh_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
