//! # canteen-database
//!
//! PostgreSQL connection management, the repository traits the auth core
//! depends on, and their PostgreSQL and in-memory implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use traits::{AccountRepository, RefreshTokenRepository};
