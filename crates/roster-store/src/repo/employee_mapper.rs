//! Employee mapper
//!
//! Maps `employees` rows to shared `Employee` instances through the
//! session's identity map.

use std::cell::RefCell;

use roster_core::{
    log_op_end, log_op_start, shared, Employee, EmployeeLookup, Review, RosterError, Shared,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::Result;
use crate::repo::{IdentityMap, Session};
use crate::schema;

const ENTITY: &str = "Employee";

const SELECT_COLUMNS: &str = "SELECT id, name, job_title, department_id FROM employees";

/// Raw `employees` row; every column except `id` is nullable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub department_id: Option<i64>,
}

impl EmployeeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            job_title: row.get(2)?,
            department_id: row.get(3)?,
        })
    }
}

/// CRUD and lookups for Employees within one session
#[derive(Clone, Copy)]
pub struct EmployeeMapper<'s> {
    session: &'s Session,
}

impl<'s> EmployeeMapper<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    fn conn(&self) -> &'s Connection {
        &self.session.conn
    }

    fn cache(&self) -> &'s RefCell<IdentityMap<Employee>> {
        &self.session.employees
    }

    /// Create the `employees` table if it does not exist
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn create_table(&self) -> Result<()> {
        schema::create_employees(self.conn())
    }

    /// Drop the `employees` table and empty the identity map
    ///
    /// Instances handed out earlier keep their ids but are no longer
    /// tracked.
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn drop_table(&self) -> Result<()> {
        schema::drop_employees(self.conn())?;
        self.cache().borrow_mut().clear();
        Ok(())
    }

    /// Insert a transient Employee and register it in the identity map
    ///
    /// Returns the id assigned by the store.
    ///
    /// # Errors
    /// Returns `AlreadyPersisted` if the instance already has an id, or
    /// `Store` if the insert fails.
    pub fn save(&self, employee: &Shared<Employee>) -> Result<i64> {
        log_op_start!("employee.save");
        let start = std::time::Instant::now();

        {
            let e = employee.borrow();
            if let Some(id) = e.id() {
                return Err(RosterError::AlreadyPersisted { entity: ENTITY, id });
            }
            self.conn().execute(
                "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3)",
                params![e.name, e.job_title, e.department_id],
            )?;
        }
        let id = self.conn().last_insert_rowid();
        employee.borrow_mut().assign_id(id);
        self.cache().borrow_mut().register(id, employee.clone());

        log_op_end!(
            "employee.save",
            duration_ms = start.elapsed().as_millis() as u64,
            employee_id = id
        );
        Ok(id)
    }

    /// Construct and save an Employee in one step
    ///
    /// # Errors
    /// Returns `Store` if the insert fails.
    pub fn create(
        &self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Shared<Employee>> {
        let employee = shared(Employee::new(name, job_title, department_id));
        self.save(&employee)?;
        Ok(employee)
    }

    /// Rewrite the row for this Employee with its current fields
    ///
    /// # Errors
    /// Returns `NotPersisted` if the id is unset, or `Store` on failure.
    pub fn update(&self, employee: &Shared<Employee>) -> Result<()> {
        log_op_start!("employee.update");
        let start = std::time::Instant::now();

        let e = employee.borrow();
        let id = e.id().ok_or(RosterError::NotPersisted {
            entity: ENTITY,
            op: "update",
        })?;
        self.conn().execute(
            "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3 WHERE id = ?4",
            params![e.name, e.job_title, e.department_id, id],
        )?;

        log_op_end!(
            "employee.update",
            duration_ms = start.elapsed().as_millis() as u64,
            employee_id = id
        );
        Ok(())
    }

    /// Delete the row, evict the instance and reset its id
    ///
    /// The identity map is checked before the row is touched.
    ///
    /// # Errors
    /// Returns `NotPersisted` if the id is unset, `NotCached` if this
    /// instance is not the one cached under its id (for example after a
    /// previous delete), or `Store` on failure.
    pub fn delete(&self, employee: &Shared<Employee>) -> Result<()> {
        log_op_start!("employee.delete");
        let start = std::time::Instant::now();

        let id = employee.borrow().id().ok_or(RosterError::NotPersisted {
            entity: ENTITY,
            op: "delete",
        })?;
        if !self.cache().borrow().holds(id, employee) {
            return Err(RosterError::NotCached { entity: ENTITY, id });
        }

        self.conn()
            .execute("DELETE FROM employees WHERE id = ?1", [id])?;
        self.cache().borrow_mut().remove(id);
        employee.borrow_mut().clear_id();

        log_op_end!(
            "employee.delete",
            duration_ms = start.elapsed().as_millis() as u64,
            employee_id = id
        );
        Ok(())
    }

    /// Map a row to its canonical instance
    ///
    /// A cached instance is refreshed in place and returned; otherwise a new
    /// instance is built, cached and returned. If the caller is currently
    /// borrowing the cached instance the refresh is skipped and the same
    /// handle is returned unchanged.
    pub fn reconcile(&self, row: EmployeeRow) -> Shared<Employee> {
        let cached = self.cache().borrow().get(row.id);
        match cached {
            Some(handle) => {
                if let Ok(mut employee) = handle.try_borrow_mut() {
                    employee.refresh(row.name, row.job_title, row.department_id);
                }
                handle
            }
            None => {
                let mut employee =
                    Employee::from_columns(row.name, row.job_title, row.department_id);
                employee.assign_id(row.id);
                let handle = shared(employee);
                self.cache().borrow_mut().register(row.id, handle.clone());
                handle
            }
        }
    }

    /// All Employees, ordered by id
    ///
    /// # Errors
    /// Returns `Store` on query failure.
    pub fn get_all(&self) -> Result<Vec<Shared<Employee>>> {
        log_op_start!("employee.get_all");
        let start = std::time::Instant::now();

        let mut stmt = self
            .conn()
            .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], EmployeeRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let employees: Vec<_> = rows.into_iter().map(|row| self.reconcile(row)).collect();

        log_op_end!(
            "employee.get_all",
            duration_ms = start.elapsed().as_millis() as u64,
            rows = employees.len()
        );
        Ok(employees)
    }

    /// Find an Employee by id
    ///
    /// # Errors
    /// Returns `Store` on query failure.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Shared<Employee>>> {
        log_op_start!("employee.find_by_id", employee_id = id);
        let start = std::time::Instant::now();

        let row = self
            .conn()
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                EmployeeRow::from_row,
            )
            .optional()?;
        let found = row.map(|row| self.reconcile(row));

        log_op_end!(
            "employee.find_by_id",
            duration_ms = start.elapsed().as_millis() as u64,
            found = found.is_some()
        );
        Ok(found)
    }

    /// Find the first Employee (lowest id) with the given name
    ///
    /// # Errors
    /// Returns `Store` on query failure.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Shared<Employee>>> {
        log_op_start!("employee.find_by_name");
        let start = std::time::Instant::now();

        let row = self
            .conn()
            .query_row(
                &format!("{} WHERE name = ?1 ORDER BY id LIMIT 1", SELECT_COLUMNS),
                [name],
                EmployeeRow::from_row,
            )
            .optional()?;
        let found = row.map(|row| self.reconcile(row));

        log_op_end!(
            "employee.find_by_name",
            duration_ms = start.elapsed().as_millis() as u64,
            found = found.is_some()
        );
        Ok(found)
    }

    /// Reviews written for this Employee
    ///
    /// A transient Employee has no reviews.
    ///
    /// # Errors
    /// Returns `Store` on query failure, or a validation error if a stored
    /// review row no longer satisfies the Review rules.
    pub fn reviews(&self, employee: &Shared<Employee>) -> Result<Vec<Shared<Review>>> {
        let id = employee.borrow().id();
        match id {
            Some(id) => self.session.reviews().for_employee(id),
            None => Ok(Vec::new()),
        }
    }
}

impl EmployeeLookup for EmployeeMapper<'_> {
    fn lookup_employee(&self, employee_id: i64) -> Result<Option<Shared<Employee>>> {
        self.find_by_id(employee_id)
    }
}
