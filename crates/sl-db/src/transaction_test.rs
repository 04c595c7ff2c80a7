use super::*;
use crate::DuckDbBackend;

#[derive(Debug)]
enum TestError {
    Db(DbError),
    Body(&'static str),
}

impl From<DbError> for TestError {
    fn from(err: DbError) -> Self {
        TestError::Db(err)
    }
}

#[test]
fn test_with_transaction_commits_on_success() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result: Result<i32, TestError> = with_transaction(&db, |db| {
        db.execute("CREATE TABLE committed (id INT)")?;
        Ok(7)
    });

    assert_eq!(result.unwrap(), 7);
    assert!(db.table_exists(None, "committed").unwrap());
}

#[test]
fn test_with_transaction_rolls_back_on_error() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result: Result<(), TestError> = with_transaction(&db, |db| {
        db.execute("CREATE TABLE discarded (id INT)")?;
        Err(TestError::Body("boom"))
    });

    assert!(matches!(result, Err(TestError::Body("boom"))));
    assert!(!db.table_exists(None, "discarded").unwrap());
}

#[test]
fn test_with_transaction_passes_db_error_through() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result: Result<(), TestError> = with_transaction(&db, |db| {
        db.execute("CREATE TABLE first (id INT)")?;
        db.execute("INSERT INTO no_such_table VALUES (1)")?;
        Ok(())
    });

    assert!(matches!(result, Err(TestError::Db(DbError::ExecutionError(_)))));
    assert!(!db.table_exists(None, "first").unwrap());

    // The connection is usable again after the rollback.
    db.execute("CREATE TABLE after (id INT)").unwrap();
}

#[test]
fn test_with_rollback_never_persists() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result: Result<bool, TestError> = with_rollback(&db, |db| {
        db.execute("CREATE TABLE probe_scratch (id INT)")?;
        Ok(db.table_exists(None, "probe_scratch")?)
    });

    assert!(result.unwrap());
    assert!(!db.table_exists(None, "probe_scratch").unwrap());
}

#[test]
fn test_with_rollback_returns_body_error() {
    let db = DuckDbBackend::in_memory().unwrap();

    let result: Result<(), TestError> = with_rollback(&db, |_| Err(TestError::Body("probe")));

    assert!(matches!(result, Err(TestError::Body("probe"))));
}
