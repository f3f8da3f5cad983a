//! Configuration loaded from environment variables.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization

pub mod cors;
pub mod database;
