//! Repository abstraction over user storage.

use async_trait::async_trait;

use domain::{DomainResult, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Only active users are visible. Every read hands back an owned copy, so
/// callers can never mutate stored state through a returned value.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: UserId) -> DomainResult<User>;

    /// Find active user by email address
    async fn find_by_email(&self, email: &str) -> DomainResult<User>;

    /// List all active users
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Fails with `EmailExists` if an active user already has the email.
    async fn save(&self, user: User) -> DomainResult<User>;

    /// Replace name, email and password of the user with `user.id()`.
    ///
    /// Refreshes `updated_at`; `created_at` is kept.
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Remove a user (soft or hard depending on the implementation)
    async fn delete(&self, id: UserId) -> DomainResult<()>;
}
