//! Session: connection plus identity maps

use std::cell::{Ref, RefCell};

use roster_core::{log_op_end, log_op_start, Employee, Review};
use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::db;
use crate::errors::Result;
use crate::repo::{EmployeeMapper, IdentityMap, ReviewMapper};

/// Unit of work over one SQLite connection
///
/// Owns the identity maps for both entity types, so two sessions never share
/// instances. Single-threaded: handles are `Rc<RefCell<_>>` and the session
/// is neither `Send` nor `Sync`.
pub struct Session {
    pub(crate) conn: Connection,
    pub(crate) employees: RefCell<IdentityMap<Employee>>,
    pub(crate) reviews: RefCell<IdentityMap<Review>>,
}

impl Session {
    /// Wrap an already-open connection; tables are not created
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            employees: RefCell::new(IdentityMap::new()),
            reviews: RefCell::new(IdentityMap::new()),
        }
    }

    /// Open a session as described by `config`
    ///
    /// # Errors
    /// Returns `Store` if the database cannot be opened, configured, or the
    /// tables cannot be created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        log_op_start!("session.open", in_memory = config.is_in_memory());
        let start = std::time::Instant::now();

        let conn = match &config.path {
            Some(path) => {
                let conn = db::open(path)?;
                db::configure(&conn, config.journal_mode)?;
                conn
            }
            None => db::open_in_memory()?,
        };

        let session = Self::new(conn);
        if config.create_tables {
            session.create_tables()?;
        }

        log_op_end!(
            "session.open",
            duration_ms = start.elapsed().as_millis() as u64
        );
        Ok(session)
    }

    /// Open an in-memory session with both tables created
    ///
    /// # Errors
    /// Returns `Store` if SQLite fails to open.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn employees(&self) -> EmployeeMapper<'_> {
        EmployeeMapper::new(self)
    }

    pub fn reviews(&self) -> ReviewMapper<'_> {
        ReviewMapper::new(self)
    }

    /// Create both tables (idempotent)
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn create_tables(&self) -> Result<()> {
        self.employees().create_table()?;
        self.reviews().create_table()
    }

    /// Drop both tables and empty both identity maps
    ///
    /// # Errors
    /// Returns `Store` on DDL failure.
    pub fn drop_tables(&self) -> Result<()> {
        self.reviews().drop_table()?;
        self.employees().drop_table()
    }

    /// Read-only view of the employee identity map
    pub fn employee_cache(&self) -> Ref<'_, IdentityMap<Employee>> {
        self.employees.borrow()
    }

    /// Read-only view of the review identity map
    pub fn review_cache(&self) -> Ref<'_, IdentityMap<Review>> {
        self.reviews.borrow()
    }
}
