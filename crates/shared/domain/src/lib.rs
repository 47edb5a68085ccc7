//! Domain layer - User entity, validation rules and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence and transport live in `user-service` and `common`.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, UserLookup, ValidationError};
pub use password::Password;
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserId, UserResponse};
