use super::*;
use sl_db::DuckDbBackend;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn counting_hook(counter: Arc<AtomicUsize>) -> impl UpgradeHook + 'static {
    move |_: &dyn Database, _: &str| -> HookResult<bool> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

#[test]
fn test_try_apply_without_hook_is_noop() {
    let db = DuckDbBackend::in_memory().unwrap();
    let registry = HookRegistry::new();

    assert!(!registry.try_apply(&db, "duckdb", 1).unwrap());
    assert!(registry.resolve(1).is_none());
}

#[test]
fn test_current_hook_runs_and_receives_dialect() {
    let db = DuckDbBackend::in_memory().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_hook = Arc::clone(&seen);

    let mut registry = HookRegistry::new();
    registry
        .register(2, move |db: &dyn Database, dialect: &str| -> HookResult<bool> {
            db.execute("CREATE TABLE hook_marker (id INT)")?;
            seen_by_hook.lock().unwrap().push(dialect.to_string());
            Ok(true)
        })
        .unwrap();

    assert!(registry.try_apply(&db, "duckdb", 2).unwrap());
    assert!(db.table_exists(None, "hook_marker").unwrap());
    assert_eq!(*seen.lock().unwrap(), vec!["duckdb".to_string()]);
}

#[test]
fn test_current_hook_shadows_deprecated() {
    let db = DuckDbBackend::in_memory().unwrap();
    let current = Arc::new(AtomicUsize::new(0));
    let deprecated = Arc::new(AtomicUsize::new(0));

    let mut registry = HookRegistry::new();
    registry.register(3, counting_hook(Arc::clone(&current))).unwrap();
    registry
        .register_deprecated(3, counting_hook(Arc::clone(&deprecated)))
        .unwrap();

    registry.try_apply(&db, "duckdb", 3).unwrap();

    assert_eq!(current.load(Ordering::SeqCst), 1);
    assert_eq!(deprecated.load(Ordering::SeqCst), 0);
    assert_eq!(registry.resolve(3).map(|(_, tier)| tier), Some(HookTier::Current));
}

#[test]
fn test_deprecated_hook_is_fallback() {
    let db = DuckDbBackend::in_memory().unwrap();
    let deprecated = Arc::new(AtomicUsize::new(0));

    let mut registry = HookRegistry::new();
    registry
        .register_deprecated(1, counting_hook(Arc::clone(&deprecated)))
        .unwrap();

    assert!(registry.try_apply(&db, "duckdb", 1).unwrap());
    assert_eq!(deprecated.load(Ordering::SeqCst), 1);
    assert_eq!(
        registry.resolve(1).map(|(_, tier)| tier),
        Some(HookTier::Deprecated)
    );
}

#[test]
fn test_changed_flag_is_informational() {
    let db = DuckDbBackend::in_memory().unwrap();
    let mut registry = HookRegistry::new();
    registry
        .register(1, |_: &dyn Database, _: &str| -> HookResult<bool> { Ok(false) })
        .unwrap();

    // The hook ran even though it reported no change.
    assert!(registry.try_apply(&db, "duckdb", 1).unwrap());
}

#[test]
fn test_hook_error_becomes_hook_failed() {
    let db = DuckDbBackend::in_memory().unwrap();
    let mut registry = HookRegistry::new();
    registry
        .register(4, |_: &dyn Database, _: &str| -> HookResult<bool> {
            Err("backfill failed".into())
        })
        .unwrap();

    let err = registry.try_apply(&db, "duckdb", 4).unwrap_err();

    assert!(matches!(err, MigrationError::HookFailed { version: 4, .. }));
    assert!(err.is_database_upgrade());
    assert!(err.to_string().contains("backfill failed"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = HookRegistry::new();
    let counter = Arc::new(AtomicUsize::new(0));

    registry.register(1, counting_hook(Arc::clone(&counter))).unwrap();
    let err = registry
        .register(1, counting_hook(Arc::clone(&counter)))
        .unwrap_err();
    assert!(matches!(err, MigrationError::DuplicateHook { version: 1 }));

    // Same version in the other tier is fine.
    registry
        .register_deprecated(1, counting_hook(counter))
        .unwrap();
    assert_eq!(registry.resolve(1).map(|(_, tier)| tier), Some(HookTier::Current));
}
