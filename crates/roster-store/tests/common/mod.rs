use roster_core::{Employee, Shared};
use roster_store::Session;

/// Fresh in-memory session with both tables
pub fn setup_session() -> Session {
    Session::open_in_memory().expect("Failed to open in-memory session")
}

/// Session with one saved employee, returned alongside it
#[allow(dead_code)]
pub fn session_with_employee(name: &str) -> (Session, Shared<Employee>) {
    let session = setup_session();
    let employee = session
        .employees()
        .create(name, "Engineer", 1)
        .expect("Failed to create employee");
    (session, employee)
}

#[allow(dead_code)]
pub fn id_of(employee: &Shared<Employee>) -> i64 {
    employee.borrow().id().expect("employee should be persisted")
}
