//! Review mapper
//!
//! Same CRUD and identity-map shape as the employee mapper. Field rules are
//! enforced by the `Review` model at assignment time, with the session's
//! employee mapper injected as the lookup; reconciliation goes through the
//! same rules so an invalid stored row surfaces as an error on read.

use std::cell::RefCell;

use roster_core::rules::validation::invalid_year;
use roster_core::{log_op_end, log_op_start, shared, Employee, Review, RosterError, Shared};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::Result;
use crate::repo::{EmployeeMapper, IdentityMap, Session};
use crate::schema;

const ENTITY: &str = "Review";

const SELECT_COLUMNS: &str = "SELECT id, year, summary, employee_id FROM reviews";

/// Raw `reviews` row
///
/// SQLite columns are dynamically typed, so `year` and `employee_id` are
/// `None` when the stored value is not an integer and `summary` is `None`
/// when it is NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: i64,
    pub year: Option<i64>,
    pub summary: Option<String>,
    pub employee_id: Option<i64>,
}

impl ReviewRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            year: integer_column(row, 1)?,
            summary: row.get(2)?,
            employee_id: integer_column(row, 3)?,
        })
    }

    /// Split into validated-ready field values
    fn into_fields(self) -> Result<(i64, String, i64)> {
        let year = self.year.ok_or_else(invalid_year)?;
        let employee_id = self
            .employee_id
            .ok_or_else(|| RosterError::validation("employee_id", "must be an integer"))?;
        Ok((year, self.summary.unwrap_or_default(), employee_id))
    }
}

fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    match row.get_ref(idx)? {
        ValueRef::Integer(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// CRUD and lookups for Reviews within one session
#[derive(Clone, Copy)]
pub struct ReviewMapper<'s> {
    session: &'s Session,
}

impl<'s> ReviewMapper<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    fn conn(&self) -> &'s Connection {
        &self.session.conn
    }

    fn cache(&self) -> &'s RefCell<IdentityMap<Review>> {
        &self.session.reviews
    }

    /// Lookup used for employee_id checks
    pub fn employees(&self) -> EmployeeMapper<'s> {
        self.session.employees()
    }

    /// Create the `reviews` table if it does not exist
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn create_table(&self) -> Result<()> {
        schema::create_reviews(self.conn())
    }

    /// Drop the `reviews` table and empty the identity map
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn drop_table(&self) -> Result<()> {
        schema::drop_reviews(self.conn())?;
        self.cache().borrow_mut().clear();
        Ok(())
    }

    /// Build a transient Review, validating every field against this session
    ///
    /// # Errors
    /// Returns `Validation` or `EmployeeNotFound` for bad field values.
    pub fn build(&self, year: i64, summary: impl Into<String>, employee_id: i64) -> Result<Review> {
        Review::new(year, summary, employee_id, &self.employees())
    }

    /// Insert a transient Review and register it in the identity map
    ///
    /// # Errors
    /// Returns `AlreadyPersisted` if the instance already has an id, or
    /// `Store` if the insert fails.
    pub fn save(&self, review: &Shared<Review>) -> Result<i64> {
        log_op_start!("review.save");
        let start = std::time::Instant::now();

        {
            let r = review.borrow();
            if let Some(id) = r.id() {
                return Err(RosterError::AlreadyPersisted { entity: ENTITY, id });
            }
            self.conn().execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3)",
                params![r.year(), r.summary(), r.employee_id()],
            )?;
        }
        let id = self.conn().last_insert_rowid();
        review.borrow_mut().assign_id(id);
        self.cache().borrow_mut().register(id, review.clone());

        log_op_end!(
            "review.save",
            duration_ms = start.elapsed().as_millis() as u64,
            review_id = id
        );
        Ok(id)
    }

    /// Create and save a Review for a persisted Employee
    ///
    /// # Errors
    /// Returns `NotPersisted` if the employee has no id, otherwise the same
    /// errors as [`ReviewMapper::create_for`].
    pub fn create(
        &self,
        year: i64,
        summary: impl Into<String>,
        employee: &Shared<Employee>,
    ) -> Result<Shared<Review>> {
        let employee_id = employee.borrow().id().ok_or(RosterError::NotPersisted {
            entity: "Employee",
            op: "review",
        })?;
        self.create_for(year, summary, employee_id)
    }

    /// Create and save a Review for an employee id
    ///
    /// # Errors
    /// Returns `Validation` or `EmployeeNotFound` for bad field values, or
    /// `Store` if the insert fails.
    pub fn create_for(
        &self,
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
    ) -> Result<Shared<Review>> {
        let review = shared(self.build(year, summary, employee_id)?);
        self.save(&review)?;
        Ok(review)
    }

    /// Rewrite the row for this Review with its current fields
    ///
    /// # Errors
    /// Returns `NotPersisted` if the id is unset, or `Store` on failure.
    pub fn update(&self, review: &Shared<Review>) -> Result<()> {
        log_op_start!("review.update");
        let start = std::time::Instant::now();

        let r = review.borrow();
        let id = r.id().ok_or(RosterError::NotPersisted {
            entity: ENTITY,
            op: "update",
        })?;
        self.conn().execute(
            "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4",
            params![r.year(), r.summary(), r.employee_id(), id],
        )?;

        log_op_end!(
            "review.update",
            duration_ms = start.elapsed().as_millis() as u64,
            review_id = id
        );
        Ok(())
    }

    /// Delete the row, evict the instance and reset its id
    ///
    /// # Errors
    /// Returns `NotPersisted` if the id is unset, `NotCached` if this
    /// instance is not the one cached under its id, or `Store` on failure.
    pub fn delete(&self, review: &Shared<Review>) -> Result<()> {
        log_op_start!("review.delete");
        let start = std::time::Instant::now();

        let id = review.borrow().id().ok_or(RosterError::NotPersisted {
            entity: ENTITY,
            op: "delete",
        })?;
        if !self.cache().borrow().holds(id, review) {
            return Err(RosterError::NotCached { entity: ENTITY, id });
        }

        self.conn().execute("DELETE FROM reviews WHERE id = ?1", [id])?;
        self.cache().borrow_mut().remove(id);
        review.borrow_mut().clear_id();

        log_op_end!(
            "review.delete",
            duration_ms = start.elapsed().as_millis() as u64,
            review_id = id
        );
        Ok(())
    }

    /// Map a row to its canonical instance
    ///
    /// A cached instance is refreshed in place through the validated
    /// setters; otherwise a new validated instance is built and cached.
    /// A cached instance the caller is currently borrowing is returned
    /// without a refresh.
    ///
    /// # Errors
    /// Returns `Validation` or `EmployeeNotFound` if the row breaks a
    /// Review rule; a cached instance is then left unchanged.
    pub fn reconcile(&self, row: ReviewRow) -> Result<Shared<Review>> {
        let id = row.id;
        let (year, summary, employee_id) = row.into_fields()?;
        let employees = self.employees();

        let cached = self.cache().borrow().get(id);
        match cached {
            Some(handle) => {
                if let Ok(mut review) = handle.try_borrow_mut() {
                    review.refresh(year, summary, employee_id, &employees)?;
                }
                Ok(handle)
            }
            None => {
                let mut review = Review::new(year, summary, employee_id, &employees)?;
                review.assign_id(id);
                let handle = shared(review);
                self.cache().borrow_mut().register(id, handle.clone());
                Ok(handle)
            }
        }
    }

    fn query_rows<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<ReviewRow>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt
            .query_map(params, ReviewRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn reconcile_all(&self, rows: Vec<ReviewRow>) -> Result<Vec<Shared<Review>>> {
        rows.into_iter().map(|row| self.reconcile(row)).collect()
    }

    /// All Reviews, ordered by id
    ///
    /// # Errors
    /// Returns `Store` on query failure or a rule error for an invalid row.
    pub fn get_all(&self) -> Result<Vec<Shared<Review>>> {
        log_op_start!("review.get_all");
        let start = std::time::Instant::now();

        let rows = self.query_rows(&format!("{} ORDER BY id", SELECT_COLUMNS), [])?;
        let reviews = self.reconcile_all(rows)?;

        log_op_end!(
            "review.get_all",
            duration_ms = start.elapsed().as_millis() as u64,
            rows = reviews.len()
        );
        Ok(reviews)
    }

    /// Find a Review by id
    ///
    /// # Errors
    /// Returns `Store` on query failure or a rule error for an invalid row.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Shared<Review>>> {
        log_op_start!("review.find_by_id", review_id = id);
        let start = std::time::Instant::now();

        let row = self
            .conn()
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                ReviewRow::from_row,
            )
            .optional()?;
        let found = row.map(|row| self.reconcile(row)).transpose()?;

        log_op_end!(
            "review.find_by_id",
            duration_ms = start.elapsed().as_millis() as u64,
            found = found.is_some()
        );
        Ok(found)
    }

    /// Reviews whose employee_id matches, ordered by id
    ///
    /// # Errors
    /// Returns `Store` on query failure or a rule error for an invalid row.
    pub fn for_employee(&self, employee_id: i64) -> Result<Vec<Shared<Review>>> {
        log_op_start!("review.for_employee", employee_id = employee_id);
        let start = std::time::Instant::now();

        let rows = self.query_rows(
            &format!("{} WHERE employee_id = ?1 ORDER BY id", SELECT_COLUMNS),
            [employee_id],
        )?;
        let reviews = self.reconcile_all(rows)?;

        log_op_end!(
            "review.for_employee",
            duration_ms = start.elapsed().as_millis() as u64,
            rows = reviews.len()
        );
        Ok(reviews)
    }
}
