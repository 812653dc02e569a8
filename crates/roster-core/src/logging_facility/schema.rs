//! Canonical schema constants for structured logging

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_EMPLOYEE_ID: &str = "employee_id";
pub const FIELD_REVIEW_ID: &str = "review_id";

// Query outcomes
pub const FIELD_ROWS: &str = "rows";
pub const FIELD_FOUND: &str = "found";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(FIELD_OP, FIELD_EVENT);
        assert_ne!(FIELD_EMPLOYEE_ID, FIELD_REVIEW_ID);
    }
}
