//! sl-db - Database abstraction layer for Schemalift
//!
//! This crate provides the `Database` and `DataSource` traits the migration
//! engine runs against, scoped transaction helpers, and the DuckDB
//! implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod transaction;

pub use duckdb::{DuckDbBackend, DuckDbDataSource};
pub use error::{DbError, DbResult};
pub use traits::{DataSource, Database};
pub use transaction::{with_rollback, with_transaction};
