//! Common utilities shared by the service crates.
//!
//! This crate provides:
//! - Boundary error type with HTTP mapping
//! - Response envelope
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult};
pub use response::{ApiResponse, Created};
