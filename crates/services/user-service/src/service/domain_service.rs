//! Cross-record business rules (email uniqueness).

use std::sync::Arc;

use domain::{DomainError, DomainResult, User, UserId, UNSAVED_USER_ID};

use crate::repository::UserRepository;

/// Checks that span more than one user record.
pub struct UserDomainService {
    repo: Arc<dyn UserRepository>,
}

impl UserDomainService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Succeed unless an active user other than `exclude_id` owns `email`.
    ///
    /// Lookup failures other than "not found" are propagated.
    pub async fn check_email_unique(&self, email: &str, exclude_id: UserId) -> DomainResult<()> {
        match self.repo.find_by_email(email).await {
            Ok(owner) if owner.id() == exclude_id => Ok(()),
            Ok(_) => Err(DomainError::email_exists(email)),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Uniqueness first, then the entity rules. Returns the first failure.
    pub async fn validate_user_for_creation(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<()> {
        self.check_email_unique(email, UNSAVED_USER_ID).await?;
        User::new(name, email, password)?;
        Ok(())
    }

    /// Dry run of an update: the user must exist, the email must be free
    /// for it, and the new fields must pass the mutation rules.
    pub async fn validate_user_for_update(
        &self,
        id: UserId,
        name: &str,
        email: &str,
    ) -> DomainResult<()> {
        let mut probe = self.repo.find_by_id(id).await?;
        self.check_email_unique(email, id).await?;

        probe.update_name(name)?;
        probe.update_email(email)?;
        Ok(())
    }
}
