use std::fmt;

use super::display_id;
use crate::errors::Result;
use crate::lookup::EmployeeLookup;
use crate::rules::validation::{validate_employee_ref, validate_summary, validate_year};

/// Review - a yearly performance review of one Employee
///
/// Every field is validated when it is assigned, including at construction,
/// so an instance can never hold a year before 2000, a blank summary, or an
/// employee_id that did not resolve when it was set. Fields are private to
/// force mutation through the validated setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: Option<i64>,
    year: i64,
    summary: String,
    employee_id: i64,
}

impl Review {
    /// Create a new transient Review
    ///
    /// # Errors
    /// Returns `Validation` for a bad year or summary and
    /// `EmployeeNotFound` when `employee_id` does not resolve through
    /// `lookup`.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        lookup: &dyn EmployeeLookup,
    ) -> Result<Self> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        validate_employee_ref(employee_id, lookup)?;

        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    /// Check if this Review has been saved
    pub fn is_persistent(&self) -> bool {
        self.id.is_some()
    }

    /// Set the review year
    ///
    /// # Errors
    /// Returns `Validation` if `year` is before 2000.
    pub fn set_year(&mut self, year: i64) -> Result<()> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Set the summary text (stored as given, checked trimmed)
    ///
    /// # Errors
    /// Returns `Validation` if the summary is blank.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<()> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Point this review at another employee
    ///
    /// # Errors
    /// Returns `EmployeeNotFound` if the id does not resolve, or the
    /// lookup's store error.
    pub fn set_employee_id(&mut self, employee_id: i64, lookup: &dyn EmployeeLookup) -> Result<()> {
        validate_employee_ref(employee_id, lookup)?;
        self.employee_id = employee_id;
        Ok(())
    }

    /// Overwrite every mutable field with values read from the store
    ///
    /// All three values are validated before any field changes, so a
    /// rejected row leaves the instance as it was.
    ///
    /// # Errors
    /// Same as [`Review::new`].
    pub fn refresh(
        &mut self,
        year: i64,
        summary: String,
        employee_id: i64,
        lookup: &dyn EmployeeLookup,
    ) -> Result<()> {
        validate_year(year)?;
        validate_summary(&summary)?;
        validate_employee_ref(employee_id, lookup)?;

        self.year = year;
        self.summary = summary;
        self.employee_id = employee_id;
        Ok(())
    }

    /// Record the id assigned by the store
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Return to the transient state after the row is deleted
    pub fn clear_id(&mut self) {
        self.id = None;
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Review {}: Year={}, Summary='{}', Employee ID={}>",
            display_id(self.id),
            self.year,
            self.summary,
            self.employee_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, RosterError};
    use crate::model::{shared, Employee, Shared};

    fn known_employees(id: i64) -> Result<Option<Shared<Employee>>> {
        Ok((1..=2)
            .contains(&id)
            .then(|| shared(Employee::new("Ada", "Engineer", 1))))
    }

    fn review() -> Review {
        Review::new(2023, "Great work", 1, &known_employees).unwrap()
    }

    #[test]
    fn test_new_review_is_transient() {
        let review = review();
        assert_eq!(review.id(), None);
        assert_eq!(review.year(), 2023);
        assert_eq!(review.summary(), "Great work");
        assert_eq!(review.employee_id(), 1);
    }

    #[test]
    fn test_new_rejects_each_bad_field() {
        let err = Review::new(1999, "ok", 1, &known_employees).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = Review::new(2020, "  ", 1, &known_employees).unwrap_err();
        assert!(matches!(err, RosterError::Validation { field: "summary", .. }));

        let err = Review::new(2020, "ok", 99, &known_employees).unwrap_err();
        assert!(matches!(err, RosterError::EmployeeNotFound { employee_id: 99 }));
    }

    #[test]
    fn test_failed_setter_keeps_prior_value() {
        let mut review = review();

        assert!(review.set_year(1999).is_err());
        assert_eq!(review.year(), 2023);

        assert!(review.set_summary("").is_err());
        assert_eq!(review.summary(), "Great work");

        assert!(review.set_employee_id(42, &known_employees).is_err());
        assert_eq!(review.employee_id(), 1);
    }

    #[test]
    fn test_setters_accept_valid_values() {
        let mut review = review();
        review.set_year(2000).unwrap();
        review.set_summary("  Solid year  ").unwrap();
        review.set_employee_id(2, &known_employees).unwrap();

        assert_eq!(review.year(), 2000);
        assert_eq!(review.summary(), "  Solid year  ");
        assert_eq!(review.employee_id(), 2);
    }

    #[test]
    fn test_refresh_is_all_or_nothing() {
        let mut review = review();
        let result = review.refresh(2024, "Updated".to_string(), 77, &known_employees);

        assert!(result.is_err());
        assert_eq!(review.year(), 2023);
        assert_eq!(review.summary(), "Great work");
    }

    #[test]
    fn test_display() {
        let mut review = review();
        review.assign_id(1);
        assert_eq!(
            review.to_string(),
            "<Review 1: Year=2023, Summary='Great work', Employee ID=1>"
        );
    }
}
