use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_minimal_config() {
    let config = Config::parse("dialect_dir: pg").unwrap();
    assert_eq!(config.dialect, "duckdb");
    assert_eq!(config.dialect_dir, "pg");
    assert!(!config.azure);
    assert_eq!(config.version_table, "schema_version");
    assert_eq!(config.scripts_path, ".");
    assert_eq!(config.database.db_type, DbType::DuckDb);
    assert_eq!(config.database.path, ":memory:");
    assert!(config.enabled);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
dialect: org.hibernate.dialect.SQLServer2012Dialect
dialect_dir: mssql
azure: true
version_table: app.db_version
scripts_path: resources
database:
  type: duckdb
  path: "./app.duckdb"
enabled: false
"#;
    let config = Config::parse(yaml).unwrap();
    assert_eq!(config.dialect, "org.hibernate.dialect.SQLServer2012Dialect");
    assert!(config.azure);
    assert!(!config.enabled);
    assert_eq!(config.version_table, "app.db_version");

    let profile = config.dialect_profile().unwrap();
    assert!(profile.is_azure());

    let root = Path::new("/srv/app");
    assert_eq!(
        config.scripts_path_absolute(root),
        PathBuf::from("/srv/app/resources")
    );
    assert_eq!(
        config.database_path(root),
        root.join("./app.duckdb").display().to_string()
    );
}

#[test]
fn test_memory_database_path_untouched() {
    let config = Config::parse("dialect_dir: pg").unwrap();
    assert_eq!(config.database_path(Path::new("/srv/app")), ":memory:");
}

#[test]
fn test_missing_dialect_dir_rejected() {
    let err = Config::parse("dialect: duckdb").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError(_)));
}

#[test]
fn test_empty_dialect_dir_rejected() {
    let err = Config::parse("dialect_dir: ''").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_invalid_version_table_rejected() {
    let err = Config::parse("dialect_dir: pg\nversion_table: \"v; DROP TABLE x\"").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::parse("dialect_dir: pg\nschema_dir: nope").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError(_)));
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schemalift.yml"), "dialect_dir: pg").unwrap();
    fs::write(dir.path().join("schemalift.yaml"), "dialect_dir: ora").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.dialect_dir, "pg");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("schemalift.yaml"), "dialect_dir: ora").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.dialect_dir, "ora");
}

#[test]
fn test_load_from_dir_missing() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}
