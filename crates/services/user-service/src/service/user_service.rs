//! User application service - orchestrates the user use cases.

use async_trait::async_trait;
use std::sync::Arc;

use domain::{
    CreateUserRequest, DomainError, DomainResult, Password, UpdateUserRequest, User, UserId,
    UserResponse,
};

use super::UserDomainService;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
///
/// Results carry only `id`, `name` and `email`; the password never leaves.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get active user by ID
    async fn get_user(&self, id: UserId) -> DomainResult<UserResponse>;

    /// List all active users
    async fn get_all_users(&self) -> DomainResult<Vec<UserResponse>>;

    /// Validate, hash the password and persist a new user
    async fn create_user(&self, request: CreateUserRequest) -> DomainResult<UserResponse>;

    /// Replace name and email of an existing user
    async fn update_user(&self, id: UserId, request: UpdateUserRequest)
        -> DomainResult<UserResponse>;

    /// Delete user
    async fn delete_user(&self, id: UserId) -> DomainResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    domain: UserDomainService,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            domain: UserDomainService::new(repo.clone()),
            repo,
        }
    }
}

fn log_conflict(err: &DomainError) {
    if let DomainError::EmailExists { email } = err {
        tracing::warn!(email = %email, "Email already in use");
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: UserId) -> DomainResult<UserResponse> {
        tracing::debug!(user_id = id, "Fetching user");
        let user = self.repo.find_by_id(id).await?;
        Ok(UserResponse::from(user))
    }

    async fn get_all_users(&self) -> DomainResult<Vec<UserResponse>> {
        let users = self.repo.find_all().await?;
        tracing::debug!(count = users.len(), "Listing users");
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn create_user(&self, request: CreateUserRequest) -> DomainResult<UserResponse> {
        let CreateUserRequest {
            name,
            email,
            password,
        } = request;

        self.domain
            .validate_user_for_creation(&name, &email, &password)
            .await
            .inspect_err(log_conflict)?;

        let user = User::new(name, email, password)?;
        let hash = Password::new(user.password())?;
        let user = user.with_password_hash(hash);

        let saved = self.repo.save(user).await.inspect_err(log_conflict)?;
        tracing::info!(user_id = saved.id(), "User created");

        Ok(UserResponse::from(saved))
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> DomainResult<UserResponse> {
        let UpdateUserRequest { name, email } = request;

        self.domain
            .validate_user_for_update(id, &name, &email)
            .await
            .inspect_err(log_conflict)?;

        let mut user = self.repo.find_by_id(id).await?;
        user.update_name(name)?;
        user.update_email(email)?;

        let saved = self.repo.update(user).await.inspect_err(log_conflict)?;
        tracing::info!(user_id = id, "User updated");

        Ok(UserResponse::from(saved))
    }

    async fn delete_user(&self, id: UserId) -> DomainResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
