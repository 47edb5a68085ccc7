//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    EMAIL_PATTERN, MAX_NAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, UNSAVED_USER_ID,
};
use crate::error::ValidationError;
use crate::password::Password;

/// Repository-assigned user identifier (`0` = not yet persisted)
pub type UserId = i32;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// User domain entity
///
/// Fields are private so that every mutation goes through a validating
/// method. Inputs are taken as-is: callers trim before calling.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    #[serde(skip_serializing)]
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Build a new, unsaved user and validate every field.
    ///
    /// # Errors
    /// Returns the first violated rule, checked in the order
    /// name, email, password.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let user = Self {
            id: UNSAVED_USER_ID,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    /// Rebuild a stored user. Storage is trusted, so no validation runs.
    pub fn from_persisted(
        id: UserId,
        name: String,
        email: String,
        password: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            created_at,
            updated_at,
        }
    }

    /// Re-check all field rules on this instance.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// Replace the name. State is untouched on failure.
    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;

        self.name = name;
        self.touch();
        Ok(())
    }

    /// Replace the email. State is untouched on failure.
    pub fn update_email(&mut self, email: impl Into<String>) -> Result<(), ValidationError> {
        let email = email.into();
        validate_email(&email)?;

        self.email = email;
        self.touch();
        Ok(())
    }

    /// Refresh `updated_at`. Never moves backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Assign identity and timestamps on first save.
    pub fn into_persisted(self, id: UserId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: at,
            updated_at: at,
            ..self
        }
    }

    /// Swap the plain-text password for its hash.
    pub fn with_password_hash(self, password: Password) -> Self {
        Self {
            password: password.into_string(),
            ..self
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password (a hash once the user went through the application service)
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the repository has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_USER_ID
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let actual = name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&actual) {
        return Err(ValidationError::NameLength { actual });
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }

    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort { actual });
    }

    Ok(())
}

/// User creation request
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateUserRequest {
    /// Display name (2-50 characters)
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "张三", min_length = 2, max_length = 50))]
    pub name: String,
    /// Email address, unique among active users
    #[validate(email(message = "Email format is invalid"))]
    #[cfg_attr(feature = "openapi", schema(example = "zhangsan@example.com"))]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "password123", min_length = 6))]
    pub password: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User update request (full replacement of name and email)
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    /// New email address
    #[validate(email(message = "Email format is invalid"))]
    pub email: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(value_type = i32, example = 1))]
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
