// Mapper operations emit start/end events through the logging facility

mod common;

use common::{id_of, session_with_employee, setup_session};
use roster_core::logging_facility::schema::{EVENT_END, EVENT_START};
use roster_core::logging_facility::test_capture::init_test_capture;
use roster_core::{shared, Employee};

#[test]
fn test_save_logs_start_and_end() {
    let capture = init_test_capture();
    let session = setup_session();

    let ada = session.employees().create("Ada", "Engineer", 1).unwrap();

    capture.assert_event_exists("employee.save", EVENT_START);
    let ends: Vec<_> = capture
        .events_for_op("employee.save")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(ends.iter().all(|e| e.duration_ms.is_some()));
    assert!(ends.iter().any(|e| e.employee_id == Some(id_of(&ada))));
}

#[test]
fn test_for_employee_logs_row_count() {
    let capture = init_test_capture();
    let (session, ada) = session_with_employee("Ada");
    let ada_id = id_of(&ada);
    session.reviews().create(2021, "Solid year", &ada).unwrap();
    session.reviews().create(2022, "Led the migration", &ada).unwrap();

    session.reviews().for_employee(ada_id).unwrap();

    let ends: Vec<_> = capture
        .events_for_op("review.for_employee")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(ends.iter().any(|e| e.rows == Some(2)));
}

#[test]
fn test_failed_operation_logs_no_end() {
    let capture = init_test_capture();
    let session = setup_session();
    let transient = shared(Employee::new("Grace", "Admiral", 2));
    let starts_before = capture.count("employee.update", EVENT_START);
    let ends_before = capture.count("employee.update", EVENT_END);

    let result = session.employees().update(&transient);

    assert!(result.is_err());
    assert!(capture.count("employee.update", EVENT_START) > starts_before);
    assert_eq!(capture.count("employee.update", EVENT_END), ends_before);
}
