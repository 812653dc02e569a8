//! Roster Core - domain models for the employee/review mapping layer
//!
//! This crate provides the store-independent half of Roster:
//! - `Employee` and `Review` models with lifecycle state (transient/persistent)
//! - Validated setters for Review fields (year, summary, employee reference)
//! - The `EmployeeLookup` capability used for referential checks
//! - The error taxonomy and the structured logging facility
//!
//! Persistence, identity maps and the mappers live in `roster-store`.

pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ErrorKind, Result, RosterError};
pub use lookup::EmployeeLookup;
pub use model::{shared, Employee, Review, Shared};
