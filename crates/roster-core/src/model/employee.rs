use std::fmt;

use super::display_id;

/// Employee - a person who can receive reviews
///
/// An Employee is transient until its first save, at which point the store
/// assigns its id. `department_id` is an opaque reference and is never
/// checked against a department table. The columns are nullable, so every
/// field is optional; `new` always fills them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Row id, `None` while transient
    id: Option<i64>,

    pub name: Option<String>,

    pub job_title: Option<String>,

    /// Foreign key into departments (not validated)
    pub department_id: Option<i64>,
}

impl Employee {
    /// Create a new transient Employee
    pub fn new(name: impl Into<String>, job_title: impl Into<String>, department_id: i64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            job_title: Some(job_title.into()),
            department_id: Some(department_id),
        }
    }

    /// Create a transient Employee from nullable column values
    pub fn from_columns(
        name: Option<String>,
        job_title: Option<String>,
        department_id: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            name,
            job_title,
            department_id,
        }
    }

    /// Row id assigned by the store, if persisted
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Check if this Employee has been saved
    pub fn is_persistent(&self) -> bool {
        self.id.is_some()
    }

    /// Record the id assigned by the store
    ///
    /// Called by the mapper after insert or when materializing a row.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Return to the transient state after the row is deleted
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Overwrite every mutable field with values read from the store
    pub fn refresh(
        &mut self,
        name: Option<String>,
        job_title: Option<String>,
        department_id: Option<i64>,
    ) {
        self.name = name;
        self.job_title = job_title;
        self.department_id = department_id;
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Employee {}: {}, {}, Dept ID: {}>",
            display_id(self.id),
            self.name.as_deref().unwrap_or("None"),
            self.job_title.as_deref().unwrap_or("None"),
            display_id(self.department_id)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_employee_is_transient() {
        let employee = Employee::new("Ada", "Engineer", 1);
        assert_eq!(employee.id(), None);
        assert!(!employee.is_persistent());
    }

    #[test]
    fn test_assign_and_clear_id() {
        let mut employee = Employee::new("Ada", "Engineer", 1);
        employee.assign_id(4);
        assert_eq!(employee.id(), Some(4));
        employee.clear_id();
        assert!(!employee.is_persistent());
    }

    #[test]
    fn test_display() {
        let mut employee = Employee::new("Ada", "Engineer", 1);
        assert_eq!(employee.to_string(), "<Employee None: Ada, Engineer, Dept ID: 1>");
        employee.assign_id(3);
        assert_eq!(employee.to_string(), "<Employee 3: Ada, Engineer, Dept ID: 1>");
    }

    #[test]
    fn test_display_missing_columns() {
        let mut employee = Employee::new("Ada", "Engineer", 1);
        employee.refresh(Some("Ada".to_string()), None, None);
        assert_eq!(employee.to_string(), "<Employee None: Ada, None, Dept ID: None>");
    }
}
