//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length, in characters
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum name length, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Email pattern: `local@domain.tld`, TLD of at least two letters
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

// =============================================================================
// Identity
// =============================================================================

/// Id carried by a user that has not been persisted yet
pub const UNSAVED_USER_ID: i32 = 0;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_USER_CREATED: &str = "User created";
pub const MSG_USER_UPDATED: &str = "User updated";
pub const MSG_USER_DELETED: &str = "User deleted";
