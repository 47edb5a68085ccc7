//! Service layer - business rules and use cases.

mod domain_service;
mod user_service;

pub use domain_service::UserDomainService;
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
