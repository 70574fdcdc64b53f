//! SQLite record store for employees and policies.
//!
//! A single connection is held behind a mutex. Each store method locks it
//! for the duration of one operation; callers never hold the lock across an
//! `.await`.
//!
//! Decimal columns are stored as TEXT so amounts round-trip exactly.

mod employees;
mod policies;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeUpdate, NewPolicy, Policy, PolicyUpdate};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        employee_id      TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        phone            TEXT,
        address          TEXT,
        current_salary   TEXT NOT NULL,
        experience_years INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS hr_policies (
        policy_id            INTEGER PRIMARY KEY AUTOINCREMENT,
        category             TEXT NOT NULL,
        experience_range     TEXT NOT NULL,
        increment_percentage TEXT NOT NULL,
        eligibility          TEXT
    );
";

/// The record store.
///
/// # Example
///
/// ```
/// use increment_engine::store::Store;
///
/// let store = Store::open_in_memory().unwrap();
/// assert!(store.list_employees().unwrap().is_empty());
/// ```
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        info!(path = %path.display(), "Opened record store");
        Self::with_schema(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` with the locked connection.
    fn with_conn<F, T>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&Connection) -> EngineResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| EngineError::Storage {
            message: format!("connection lock poisoned: {e}"),
        })?;
        f(&guard)
    }

    /// Registers a new employee. A taken id is a conflict.
    pub fn insert_employee(&self, employee: &Employee) -> EngineResult<()> {
        self.with_conn(|conn| employees::insert_employee(conn, employee))
    }

    /// Fetches one employee.
    pub fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        self.with_conn(|conn| employees::get_employee(conn, employee_id))
    }

    /// Lists all employees by ascending id.
    pub fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.with_conn(employees::list_employees)
    }

    /// Applies a partial update and returns the updated record.
    pub fn update_employee(
        &self,
        employee_id: &str,
        update: &EmployeeUpdate,
    ) -> EngineResult<Employee> {
        self.with_conn(|conn| employees::update_employee(conn, employee_id, update))
    }

    /// Deletes one employee.
    pub fn delete_employee(&self, employee_id: &str) -> EngineResult<()> {
        self.with_conn(|conn| employees::delete_employee(conn, employee_id))
    }

    /// Stores a new policy and returns its assigned id.
    pub fn insert_policy(&self, policy: &NewPolicy) -> EngineResult<i64> {
        self.with_conn(|conn| policies::insert_policy(conn, policy))
    }

    /// Fetches one policy.
    pub fn get_policy(&self, policy_id: i64) -> EngineResult<Option<Policy>> {
        self.with_conn(|conn| policies::get_policy(conn, policy_id))
    }

    /// Lists all policies by ascending id, the order used for matching.
    pub fn list_policies(&self) -> EngineResult<Vec<Policy>> {
        self.with_conn(policies::list_policies)
    }

    /// Applies a partial update and returns the updated record.
    pub fn update_policy(&self, policy_id: i64, update: &PolicyUpdate) -> EngineResult<Policy> {
        self.with_conn(|conn| policies::update_policy(conn, policy_id, update))
    }

    /// Deletes one policy.
    pub fn delete_policy(&self, policy_id: i64) -> EngineResult<()> {
        self.with_conn(|conn| policies::delete_policy(conn, policy_id))
    }

    /// Returns the number of stored policies.
    pub fn count_policies(&self) -> EngineResult<usize> {
        self.with_conn(policies::count_policies)
    }

    /// Inserts `defaults` when no policy is stored yet.
    ///
    /// Returns how many policies were inserted.
    pub fn seed_policies(&self, defaults: &[NewPolicy]) -> EngineResult<usize> {
        self.with_conn(|conn| {
            if policies::count_policies(conn)? > 0 {
                return Ok(0);
            }
            let tx = conn.unchecked_transaction()?;
            for policy in defaults {
                policies::insert_policy(&tx, policy)?;
            }
            tx.commit()?;
            info!(count = defaults.len(), "Seeded default policies");
            Ok(defaults.len())
        })
    }
}

/// Reads a TEXT column holding a decimal.
fn decimal_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<rust_decimal::Decimal> {
    let text: String = row.get(idx)?;
    text.parse().map_err(|e: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
