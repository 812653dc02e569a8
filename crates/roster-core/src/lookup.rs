//! Employee lookup capability
//!
//! Review validation needs to know whether an employee id resolves to a
//! stored Employee. The check is injected rather than wired to a mapper so
//! that models stay store-independent and tests can supply fakes.

use crate::errors::Result;
use crate::model::{Employee, Shared};

/// Resolves an employee id to the live Employee instance, if any
pub trait EmployeeLookup {
    /// Look up an employee by id
    ///
    /// # Errors
    /// Returns any error raised by the backing store.
    fn lookup_employee(&self, employee_id: i64) -> Result<Option<Shared<Employee>>>;
}

impl<F> EmployeeLookup for F
where
    F: Fn(i64) -> Result<Option<Shared<Employee>>>,
{
    fn lookup_employee(&self, employee_id: i64) -> Result<Option<Shared<Employee>>> {
        self(employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shared;

    #[test]
    fn test_closure_acts_as_lookup() {
        let ada = shared(Employee::new("Ada", "Engineer", 1));
        let lookup = |id: i64| -> Result<Option<Shared<Employee>>> {
            Ok((id == 1).then(|| ada.clone()))
        };

        assert!(lookup.lookup_employee(1).unwrap().is_some());
        assert!(lookup.lookup_employee(2).unwrap().is_none());
    }
}
