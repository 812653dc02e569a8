use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and in tests, independently of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Validation
    InvalidInput,
    NotFound,

    // Lifecycle
    AlreadyExists,
    InvalidState,
    CacheInconsistent,

    // Integration
    Persistence,
    Config,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ErrorKind::NotFound => "ERR_NOT_FOUND",
            ErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ErrorKind::InvalidState => "ERR_INVALID_STATE",
            ErrorKind::CacheInconsistent => "ERR_CACHE_INCONSISTENT",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
            ErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Error taxonomy for Roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// A field value failed its constraint
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An employee_id did not resolve to an existing Employee
    #[error("employee_id must reference a valid Employee: {employee_id} not found")]
    EmployeeNotFound { employee_id: i64 },

    /// save() was called on an instance that already has a row
    #[error("{entity} {id} is already persisted")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// The operation needs a persisted instance but the id is unset
    #[error("Cannot {op} {entity}: instance has not been saved")]
    NotPersisted {
        entity: &'static str,
        op: &'static str,
    },

    /// The id is set but the identity map holds no entry for it
    #[error("{entity} {id} is not present in the identity map")]
    NotCached { entity: &'static str, id: i64 },

    /// Failure reported by the underlying store, passed through unchanged
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Invalid store configuration
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl RosterError {
    /// Create a validation error for the given field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RosterError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Validation { .. } => ErrorKind::InvalidInput,
            RosterError::EmployeeNotFound { .. } => ErrorKind::NotFound,
            RosterError::AlreadyPersisted { .. } => ErrorKind::AlreadyExists,
            RosterError::NotPersisted { .. } => ErrorKind::InvalidState,
            RosterError::NotCached { .. } => ErrorKind::CacheInconsistent,
            RosterError::Store(_) => ErrorKind::Persistence,
            RosterError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_distinct() {
        let kinds = [
            ErrorKind::InvalidInput,
            ErrorKind::NotFound,
            ErrorKind::AlreadyExists,
            ErrorKind::InvalidState,
            ErrorKind::CacheInconsistent,
            ErrorKind::Persistence,
            ErrorKind::Config,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = RosterError::validation("year", "must be an integer >= 2000");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Invalid year: must be an integer >= 2000");
    }

    #[test]
    fn test_store_error_keeps_source() {
        let err: RosterError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.code(), "ERR_PERSISTENCE");
        assert!(matches!(
            err,
            RosterError::Store(rusqlite::Error::QueryReturnedNoRows)
        ));
    }

    #[test]
    fn test_not_cached_is_cache_inconsistent() {
        let err = RosterError::NotCached {
            entity: "Employee",
            id: 7,
        };
        assert_eq!(err.code(), "ERR_CACHE_INCONSISTENT");
        assert!(err.to_string().contains("Employee 7"));
    }
}
