//! Feature modules. Each follows the same structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic and queries
//! - `model.rs`: database structs and DTOs
//! - `router.rs`: axum router configuration

pub mod assignment_types;
pub mod assignments;
pub mod enrollments;
pub mod lessons;
pub mod schools;
pub mod scores;
pub mod signup_pins;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
