//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{DataSource, Database};
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const MEMORY_PATH: &str = ":memory:";

fn lock_connection(conn: &Mutex<Connection>) -> DbResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| DbError::MutexPoisoned(e.to_string()))
}

fn open_in_memory() -> DbResult<Connection> {
    Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))
}

fn open_path(path: &Path) -> DbResult<Connection> {
    Connection::open(path)
        .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))
}

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_in_memory()?))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        Ok(Self::from_connection(open_path(path)?))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == MEMORY_PATH {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn transaction_control(&self, operation: &str, sql: &str) -> DbResult<()> {
        let conn = lock_connection(&self.conn)?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError {
                operation: operation.to_string(),
                message: e.to_string(),
            })
    }
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        let conn = lock_connection(&self.conn)?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn query_optional_i32(&self, sql: &str) -> DbResult<Option<i32>> {
        let conn = lock_connection(&self.conn)?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let value = match rows.next()? {
            Some(row) => Some(row.get::<_, i32>(0)?),
            None => None,
        };
        Ok(value)
    }

    fn query_count(&self, sql: &str) -> DbResult<usize> {
        let conn = lock_connection(&self.conn)?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({sql})"), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        usize::try_from(count).map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn table_exists(&self, schema: Option<&str>, table: &str) -> DbResult<bool> {
        let conn = lock_connection(&self.conn)?;

        let count: i64 = match schema {
            Some(schema) => conn.query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_catalog = current_database() AND table_schema = ? AND table_name = ?",
                duckdb::params![schema, table],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_catalog = current_database() AND table_name = ?",
                duckdb::params![table],
                |row| row.get(0),
            )?,
        };

        Ok(count > 0)
    }

    fn current_schema(&self) -> DbResult<Option<String>> {
        let conn = lock_connection(&self.conn)?;
        let schema: Option<String> =
            conn.query_row("SELECT current_schema()", [], |row| row.get(0))?;
        Ok(schema.filter(|s| !s.trim().is_empty()))
    }

    fn begin(&self) -> DbResult<()> {
        self.transaction_control("BEGIN", "BEGIN TRANSACTION")
    }

    fn commit(&self) -> DbResult<()> {
        self.transaction_control("COMMIT", "COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.transaction_control("ROLLBACK", "ROLLBACK")
    }
}

/// DuckDB data source.
///
/// Holds one root connection and hands out clones of it, so every
/// connection sees the same database instance. This is what makes
/// `:memory:` databases usable across separate operations.
pub struct DuckDbDataSource {
    root: Mutex<Connection>,
}

impl DuckDbDataSource {
    /// Create a data source over a fresh in-memory database
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self {
            root: Mutex::new(open_in_memory()?),
        })
    }

    /// Create a data source over a database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        Ok(Self {
            root: Mutex::new(open_path(path)?),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == MEMORY_PATH {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }
}

impl DataSource for DuckDbDataSource {
    fn connection(&self) -> DbResult<Box<dyn Database>> {
        let root = lock_connection(&self.root)?;
        let conn = root
            .try_clone()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Box::new(DuckDbBackend::from_connection(conn)))
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
