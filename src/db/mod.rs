//! Database module for the football management server
//!
//! Postgres pool, row models and every query the server runs.

pub mod models;
pub mod operations;

pub use models::{User, UserSummary};
pub use operations::DbOperations;
