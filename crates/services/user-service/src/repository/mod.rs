//! Repository layer for data access.

pub mod entities;
mod memory;
mod store;
mod user_repository;

pub use memory::InMemoryUserRepository;
pub use store::UserStore;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
