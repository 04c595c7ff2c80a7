//! Scoped transaction helpers.
//!
//! Both helpers guarantee the transaction is closed on every exit path, so
//! call sites never issue `COMMIT`/`ROLLBACK` themselves.

use crate::error::DbError;
use crate::traits::Database;

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// The error returned by `body` is passed through unchanged. If the commit
/// itself fails the transaction is rolled back and the commit error returned.
pub fn with_transaction<T, E, F>(db: &dyn Database, body: F) -> Result<T, E>
where
    F: FnOnce(&dyn Database) -> Result<T, E>,
    E: From<DbError>,
{
    db.begin()?;

    let result = body(db);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = db.commit() {
                rollback_quietly(db);
                return Err(commit_err.into());
            }
        }
        Err(_) => rollback_quietly(db),
    }
    result
}

/// Execute `body` within a transaction that is always rolled back.
///
/// Used for read-only probes: nothing `body` does is ever persisted.
pub fn with_rollback<T, E, F>(db: &dyn Database, body: F) -> Result<T, E>
where
    F: FnOnce(&dyn Database) -> Result<T, E>,
    E: From<DbError>,
{
    db.begin()?;

    let result = body(db);

    match (db.rollback(), result) {
        (Ok(()), result) => result,
        (Err(e), Ok(_)) => Err(e.into()),
        (Err(e), Err(body_err)) => {
            log::warn!("Rollback failed after error: {e}");
            Err(body_err)
        }
    }
}

fn rollback_quietly(db: &dyn Database) {
    if let Err(e) = db.rollback() {
        log::warn!("Rollback failed: {e}");
    }
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;
