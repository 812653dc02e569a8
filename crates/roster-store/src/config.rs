//! Store configuration
//!
//! A `StoreConfig` can be written in TOML:
//!
//! ```toml
//! path = "roster.db"
//! journal_mode = "wal"
//! create_tables = true
//! ```
//!
//! `ROSTER_DB_PATH` overrides `path` when loading with env overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{config_error, Result};

/// Environment variable naming the database file
pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";

/// SQLite journal mode applied to file-backed databases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Memory,
}

impl JournalMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Memory => "MEMORY",
        }
    }
}

/// Settings used to open a `Session`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    pub journal_mode: JournalMode,
    /// Create both tables when the session opens
    pub create_tables: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            journal_mode: JournalMode::default(),
            create_tables: true,
        }
    }
}

impl StoreConfig {
    /// Configuration for a fresh in-memory database
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Configuration for a database file
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// Returns `Config` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(e.to_string()))
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `ROSTER_DB_PATH` if it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = var(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            self.path = Some(PathBuf::from(path));
        }
        self
    }

    /// Check if this configuration opens an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }
}
