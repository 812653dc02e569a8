mod common;

use common::FakeEmployees;
use roster_core::{ErrorKind, Review, RosterError};

// ===== CONSTRUCTION =====

#[test]
fn test_construct_valid_review() {
    let employees = FakeEmployees::with_ids(&[1]);

    let review = Review::new(2023, "Great work", 1, &employees).unwrap();

    assert_eq!(review.year(), 2023);
    assert_eq!(review.summary(), "Great work");
    assert_eq!(review.employee_id(), 1);
    assert!(!review.is_persistent());
}

#[test]
fn test_construction_checks_employee_immediately() {
    let employees = FakeEmployees::with_ids(&[1]);

    Review::new(2023, "Great work", 1, &employees).unwrap();

    assert_eq!(employees.lookup_count(), 1);
}

#[test]
fn test_year_checked_before_employee_lookup() {
    let employees = FakeEmployees::with_ids(&[1]);

    let result = Review::new(1999, "Great work", 1, &employees);

    assert!(matches!(result, Err(RosterError::Validation { field: "year", .. })));
    assert_eq!(employees.lookup_count(), 0);
}

// ===== REASSIGNMENT =====

#[test]
fn test_reassign_to_removed_employee_fails() {
    let mut employees = FakeEmployees::with_ids(&[1, 2]);
    let mut review = Review::new(2023, "Great work", 1, &employees).unwrap();

    employees.remove(2);
    let err = review.set_employee_id(2, &employees).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn test_reassign_to_existing_employee() {
    let mut employees = FakeEmployees::with_ids(&[1]);
    let mut review = Review::new(2023, "Great work", 1, &employees).unwrap();

    employees.insert(5, "Grace");
    review.set_employee_id(5, &employees).unwrap();

    assert_eq!(review.employee_id(), 5);
}

#[test]
fn test_blank_summaries_rejected() {
    let employees = FakeEmployees::with_ids(&[1]);
    let mut review = Review::new(2023, "Great work", 1, &employees).unwrap();

    for blank in ["", "   ", "\n\t "] {
        let err = review.set_summary(blank).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }
    assert_eq!(review.summary(), "Great work");
}
