//! Repository implementations.

pub mod memory;
pub mod session;
pub mod user;

pub use memory::{MemorySessionRepository, MemoryUserRepository};
pub use session::SessionRepository;
pub use user::UserRepository;
