use super::*;
use crate::cli::GlobalArgs;
use sl_db::{Database, DuckDbBackend};
use sl_migrate::NoopInitializer;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_project(root: &Path) {
    fs::write(
        root.join("schemalift.yml"),
        "dialect_dir: duckdb\ndatabase:\n  path: app.duckdb\n",
    )
    .unwrap();

    let upgrades = root.join("schema/upgrades/duckdb");
    fs::create_dir_all(&upgrades).unwrap();
    fs::write(
        root.join("schema/duckdb-schema.sql"),
        "CREATE TABLE accounts (id INTEGER, label VARCHAR);",
    )
    .unwrap();
    fs::write(upgrades.join("1.sql"), "CREATE TABLE accounts (id INTEGER);").unwrap();
    fs::write(
        upgrades.join("2.sql"),
        "ALTER TABLE accounts ADD COLUMN label VARCHAR;",
    )
    .unwrap();
}

fn global(root: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: root.display().to_string(),
        config: None,
        database: None,
    }
}

fn recorded_version(root: &Path) -> Option<i32> {
    let db = DuckDbBackend::from_path(&root.join("app.duckdb")).unwrap();
    db.query_optional_i32("SELECT version FROM schema_version")
        .unwrap()
}

#[test]
fn test_migrate_initializes_file_database() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    execute(Operation::InitializeOrUpdate, &global(temp.path())).unwrap();

    assert_eq!(recorded_version(temp.path()), Some(2));
}

#[test]
fn test_init_then_update_is_noop() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    execute(Operation::InitializeEmpty, &global(temp.path())).unwrap();
    execute(Operation::UpdateExisting, &global(temp.path())).unwrap();

    assert_eq!(recorded_version(temp.path()), Some(2));
}

#[test]
fn test_update_uninitialized_fails_with_context() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let err = execute(Operation::UpdateExisting, &global(temp.path())).unwrap_err();

    assert_eq!(err.to_string(), "Schema update failed");
    assert!(format!("{err:#}").contains("[SL002]"));
}

#[test]
fn test_second_init_reports_schema_not_empty() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    execute(Operation::InitializeEmpty, &global(temp.path())).unwrap();

    let err = execute(Operation::InitializeEmpty, &global(temp.path())).unwrap_err();

    assert_eq!(err.to_string(), "Schema initialization failed");
    assert!(format!("{err:#}").contains("[SL001]"));
}

#[test]
fn test_noop_initializer_reports_none() {
    for operation in [
        Operation::InitializeEmpty,
        Operation::UpdateExisting,
        Operation::InitializeOrUpdate,
    ] {
        assert_eq!(operation.run(&NoopInitializer).unwrap(), None);
    }
}
