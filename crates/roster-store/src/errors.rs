//! Error handling for roster-store
//!
//! Store operations share the core error type; rusqlite errors convert into
//! `RosterError::Store` unchanged via `?`.

use roster_core::errors::RosterError;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> RosterError {
    RosterError::Config {
        reason: reason.into(),
    }
}
