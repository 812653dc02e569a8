//! Table definitions
//!
//! Each mapper owns its table; DDL here is idempotent so create/drop can be
//! called repeatedly.

use crate::errors::Result;
use rusqlite::Connection;

pub const EMPLOYEES_TABLE: &str = "employees";
pub const REVIEWS_TABLE: &str = "reviews";

const CREATE_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    job_title TEXT,
    department_id INTEGER
)";

const CREATE_REVIEWS: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER,
    summary TEXT,
    employee_id INTEGER
)";

pub fn create_employees(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_EMPLOYEES, [])?;
    Ok(())
}

pub fn drop_employees(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS employees", [])?;
    Ok(())
}

pub fn create_reviews(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_REVIEWS, [])?;
    Ok(())
}

pub fn drop_reviews(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS reviews", [])?;
    Ok(())
}

/// List user tables, sorted by name
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}
