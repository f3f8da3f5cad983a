//! Shared utilities used throughout the application:
//!
//! - [`errors`]: Application error types and handling
//! - [`pagination`]: Request pagination utilities
//! - [`password`]: Password hashing and verification

pub mod errors;
pub mod pagination;
pub mod password;
