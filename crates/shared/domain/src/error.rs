//! Domain-level errors.
//!
//! These errors represent business rule violations and storage failures as
//! seen by the core. They are independent of infrastructure concerns (HTTP,
//! database drivers); the boundary maps them to transport signals.

use std::fmt;

use thiserror::Error;

use crate::constants::{MAX_NAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::user::UserId;

/// Field-level validation failure. Checked in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error(
        "Name must be between {} and {} characters (got {actual})",
        MIN_NAME_LENGTH,
        MAX_NAME_LENGTH
    )]
    NameLength { actual: usize },

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email format is invalid")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password must be at least {} characters (got {actual})", MIN_PASSWORD_LENGTH)]
    PasswordTooShort { actual: usize },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName | ValidationError::NameLength { .. } => "name",
            ValidationError::EmptyEmail | ValidationError::InvalidEmailFormat => "email",
            ValidationError::EmptyPassword | ValidationError::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable error code for clients
    pub fn code(&self) -> &'static str {
        match self.field() {
            "name" => "INVALID_NAME",
            "email" => "INVALID_EMAIL",
            _ => "INVALID_PASSWORD",
        }
    }
}

/// Key used for a lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Email(String),
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLookup::Id(id) => write!(f, "id={}", id),
            UserLookup::Email(email) => write!(f, "email={}", email),
        }
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another active user already owns this email
    #[error("Email {email} already exists")]
    EmailExists { email: String },

    /// No active user matches the lookup
    #[error("User not found ({0})")]
    NotFound(UserLookup),

    /// Underlying storage failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Non-storage internal failure (e.g. password hashing)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn email_exists(email: impl Into<String>) -> Self {
        DomainError::EmailExists {
            email: email.into(),
        }
    }

    pub fn not_found_id(id: UserId) -> Self {
        DomainError::NotFound(UserLookup::Id(id))
    }

    pub fn not_found_email(email: impl Into<String>) -> Self {
        DomainError::NotFound(UserLookup::Email(email.into()))
    }

    pub fn repository(cause: impl fmt::Display) -> Self {
        DomainError::Repository(cause.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
