//! Roster Store - SQLite persistence for Employees and Reviews
//!
//! Provides:
//! - Connection management and TOML/env configuration
//! - Table DDL for `employees` and `reviews`
//! - Per-entity identity maps owned by a `Session`
//! - Employee and Review mappers with row reconciliation

pub mod config;
pub mod db;
pub mod errors;
pub mod repo;
pub mod schema;

// Re-export key types
pub use config::{JournalMode, StoreConfig};
pub use errors::Result;
pub use repo::{EmployeeMapper, IdentityMap, ReviewMapper, Session};
