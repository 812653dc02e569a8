//! Field rules for Review
//!
//! Each check runs at assignment time; a failure leaves the target field
//! untouched.

use crate::errors::{Result, RosterError};
use crate::lookup::EmployeeLookup;

/// Earliest accepted review year
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Error for a year that is not an integer >= 2000
pub fn invalid_year() -> RosterError {
    RosterError::validation("year", format!("must be an integer >= {}", MIN_REVIEW_YEAR))
}

/// Validate a review year
///
/// # Errors
/// Returns `Validation` when `year` is before `MIN_REVIEW_YEAR`.
pub fn validate_year(year: i64) -> Result<()> {
    if year >= MIN_REVIEW_YEAR {
        Ok(())
    } else {
        Err(invalid_year())
    }
}

/// Validate a review summary
///
/// # Errors
/// Returns `Validation` when the summary is empty once surrounding
/// whitespace is stripped.
pub fn validate_summary(summary: &str) -> Result<()> {
    if summary.trim().is_empty() {
        return Err(RosterError::validation(
            "summary",
            "must be a non-empty string",
        ));
    }
    Ok(())
}

/// Validate that an employee id resolves to a stored Employee
///
/// # Errors
/// Returns `EmployeeNotFound` when the lookup finds nothing, or the
/// lookup's own error.
pub fn validate_employee_ref(employee_id: i64, lookup: &dyn EmployeeLookup) -> Result<()> {
    match lookup.lookup_employee(employee_id)? {
        Some(_) => Ok(()),
        None => Err(RosterError::EmployeeNotFound { employee_id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::model::{shared, Employee, Shared};
    use proptest::prelude::*;

    fn only_employee_one(id: i64) -> Result<Option<Shared<Employee>>> {
        Ok((id == 1).then(|| shared(Employee::new("Ada", "Engineer", 1))))
    }

    #[test]
    fn test_year_boundary() {
        assert!(validate_year(2000).is_ok());
        let err = validate_year(1999).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Invalid year: must be an integer >= 2000");
    }

    #[test]
    fn test_summary_rejects_blank() {
        assert!(validate_summary("Great work").is_ok());
        assert!(validate_summary("  padded  ").is_ok());
        assert!(validate_summary("").is_err());
        assert!(validate_summary("   ").is_err());
        assert!(validate_summary("\t\n").is_err());
    }

    #[test]
    fn test_employee_ref() {
        assert!(validate_employee_ref(1, &only_employee_one).is_ok());
        let err = validate_employee_ref(2, &only_employee_one).unwrap_err();
        assert!(matches!(err, RosterError::EmployeeNotFound { employee_id: 2 }));
    }

    #[test]
    fn test_employee_ref_propagates_lookup_error() {
        let failing = |_: i64| -> Result<Option<Shared<Employee>>> {
            Err(rusqlite::Error::InvalidQuery.into())
        };
        let err = validate_employee_ref(1, &failing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    proptest! {
        #[test]
        fn prop_year_accepted_iff_at_least_2000(year in -10_000i64..10_000) {
            prop_assert_eq!(validate_year(year).is_ok(), year >= MIN_REVIEW_YEAR);
        }

        #[test]
        fn prop_summary_with_visible_char_accepted(
            pad in "[ \t]{0,4}",
            body in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}",
        ) {
            let summary = format!("{pad}{body}{pad}");
            prop_assert!(validate_summary(&summary).is_ok());
        }
    }
}
