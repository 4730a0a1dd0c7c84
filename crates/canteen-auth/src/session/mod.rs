//! Refresh token storage, the session lifecycle, and expired session cleanup.

pub mod cleanup;
pub mod manager;
pub mod store;
pub mod token;

pub use cleanup::SessionCleanup;
pub use manager::SessionManager;
pub use store::SessionStore;
