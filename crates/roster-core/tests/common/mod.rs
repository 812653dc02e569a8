use std::cell::RefCell;
use std::collections::HashMap;

use roster_core::{shared, Employee, EmployeeLookup, Result, Shared};

/// In-memory stand-in for the employee mapper
///
/// Counts lookups so tests can assert when validation consults it.
#[derive(Default)]
pub struct FakeEmployees {
    employees: HashMap<i64, Shared<Employee>>,
    lookups: RefCell<usize>,
}

impl FakeEmployees {
    #[allow(dead_code)]
    pub fn with_ids(ids: &[i64]) -> Self {
        let mut fake = Self::default();
        for &id in ids {
            fake.insert(id, &format!("Employee {}", id));
        }
        fake
    }

    #[allow(dead_code)]
    pub fn insert(&mut self, id: i64, name: &str) -> Shared<Employee> {
        let mut employee = Employee::new(name, "Engineer", 1);
        employee.assign_id(id);
        let handle = shared(employee);
        self.employees.insert(id, handle.clone());
        handle
    }

    #[allow(dead_code)]
    pub fn remove(&mut self, id: i64) {
        self.employees.remove(&id);
    }

    #[allow(dead_code)]
    pub fn lookup_count(&self) -> usize {
        *self.lookups.borrow()
    }
}

impl EmployeeLookup for FakeEmployees {
    fn lookup_employee(&self, employee_id: i64) -> Result<Option<Shared<Employee>>> {
        *self.lookups.borrow_mut() += 1;
        Ok(self.employees.get(&employee_id).cloned())
    }
}
