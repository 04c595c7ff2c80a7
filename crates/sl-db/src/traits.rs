//! Database trait definitions

use crate::error::DbResult;

/// A single database connection with manual transaction control.
///
/// All calls are blocking. Statements issued between [`begin`](Self::begin)
/// and [`commit`](Self::commit)/[`rollback`](Self::rollback) belong to one
/// transaction.
pub trait Database: Send + Sync {
    /// Execute one SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Read the first column of the first row as an integer.
    ///
    /// Returns `None` when the query yields no rows.
    fn query_optional_i32(&self, sql: &str) -> DbResult<Option<i32>>;

    /// Count rows returned by a query
    fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Check whether a table with exactly this name exists in the current
    /// catalog, optionally restricted to `schema`.
    ///
    /// Name matching is exact; case folding is the caller's concern.
    fn table_exists(&self, schema: Option<&str>, table: &str) -> DbResult<bool>;

    /// The connection's current schema, if the backend has one
    fn current_schema(&self) -> DbResult<Option<String>>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;
}

/// Hands out connections, one per top-level operation.
pub trait DataSource: Send + Sync {
    /// Open a new connection
    fn connection(&self) -> DbResult<Box<dyn Database>>;
}
