//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::JournalMode;
use crate::errors::Result;
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Ok(Connection::open(path)?)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Ok(Connection::open_in_memory()?)
}

/// Apply the journal mode to a file-backed connection
///
/// Returns the mode SQLite reports after the change. In-memory databases
/// always report `memory`.
pub fn configure(conn: &Connection, journal_mode: JournalMode) -> Result<String> {
    let sql = format!("PRAGMA journal_mode = {}", journal_mode.as_pragma());
    let applied: String = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(applied)
}
