//! Schema orchestration.
//!
//! [`Migrator`] ties the script locator, version store and hook registry
//! together. Each public operation opens its own connection and runs inside
//! one transaction, so a failure at any step leaves the database exactly as
//! it was before the call.

use crate::error::{MigrationError, MigrationResult};
use crate::hooks::HookRegistry;
use crate::locator::ScriptLocator;
use crate::source::ScriptSource;
use crate::version::VersionStore;
use log::{debug, info};
use serde::Serialize;
use sl_core::{split_statements, DialectProfile};
use sl_db::{with_rollback, with_transaction, DataSource, Database};
use std::sync::Arc;

/// Entry points for bringing a schema up to date.
///
/// Implementations return the resulting schema version, or `None` when they
/// do not manage the schema at all.
pub trait SchemaInitializer {
    /// Install the full schema into a database without a version table.
    fn initialize_empty(&self) -> MigrationResult<Option<i32>>;

    /// Step an initialized database forward to the latest version.
    fn update_existing(&self) -> MigrationResult<Option<i32>>;

    /// Initialize or update, depending on the database's current state.
    fn initialize_or_update(&self) -> MigrationResult<Option<i32>>;
}

/// Initializer for deployments whose schema is managed elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInitializer;

impl SchemaInitializer for NoopInitializer {
    fn initialize_empty(&self) -> MigrationResult<Option<i32>> {
        info!("Schema management disabled, skipping initialization");
        Ok(None)
    }

    fn update_existing(&self) -> MigrationResult<Option<i32>> {
        info!("Schema management disabled, skipping update");
        Ok(None)
    }

    fn initialize_or_update(&self) -> MigrationResult<Option<i32>> {
        info!("Schema management disabled, skipping initialization and update");
        Ok(None)
    }
}

/// Snapshot of where a database stands relative to the available scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaStatus {
    /// Recorded version, `None` when the version table is absent
    pub current: Option<i32>,
    /// Highest contiguous upgrade script available
    pub latest: i32,
}

impl SchemaStatus {
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Number of upgrade steps an update would apply.
    pub fn pending_steps(&self) -> i32 {
        match self.current {
            Some(current) if current >= 0 && current < self.latest => self.latest - current,
            _ => 0,
        }
    }

    /// Whether the database records a version no script accounts for.
    pub fn is_ahead(&self) -> bool {
        matches!(self.current, Some(current) if current > self.latest)
    }
}

/// Transactional schema initializer and upgrader.
pub struct Migrator {
    data_source: Arc<dyn DataSource>,
    profile: DialectProfile,
    locator: ScriptLocator,
    versions: VersionStore,
    hooks: HookRegistry,
}

impl Migrator {
    pub fn new(
        data_source: Arc<dyn DataSource>,
        profile: DialectProfile,
        source: Arc<dyn ScriptSource>,
        version_table: impl Into<String>,
    ) -> Self {
        let locator = ScriptLocator::new(source, &profile);
        let versions = VersionStore::new(version_table, profile.family());
        Self {
            data_source,
            profile,
            locator,
            versions,
            hooks: HookRegistry::new(),
        }
    }

    /// Replace the hook registry.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    pub fn locator(&self) -> &ScriptLocator {
        &self.locator
    }

    pub fn version_store(&self) -> &VersionStore {
        &self.versions
    }

    /// Install the full schema, create the version table at the latest
    /// version, then run the additional script if one exists.
    ///
    /// Fails with [`MigrationError::SchemaNotEmpty`] when a version table is
    /// already present.
    pub fn initialize_empty(&self) -> MigrationResult<i32> {
        let conn = self.data_source.connection()?;
        let version = with_transaction(conn.as_ref(), |db| {
            if self.versions.get_version(db)?.is_some() {
                return Err(MigrationError::SchemaNotEmpty);
            }

            let latest = self.locator.calculate_latest_version()?;
            info!(
                "Initializing empty schema from {} at version {latest}",
                self.locator.full_schema_path()
            );
            let full_schema = self.locator.find_full_schema_script()?;
            self.execute_script(db, &full_schema)?;

            self.versions.create_version_table(db)?;
            self.versions.set_version(db, latest)?;

            if let Some(additional) = self.locator.find_additional_script()? {
                info!(
                    "Executing additional script {}",
                    self.locator.additional_script_path()
                );
                self.execute_script(db, &additional)?;
            }

            Ok(self.versions.get_version(db)?.unwrap_or(latest))
        })?;

        info!("Initialization complete, schema version set to {version}");
        Ok(version)
    }

    /// Apply upgrade scripts `V+1, V+2, ...` until the next one is missing.
    ///
    /// When nothing was applied and `V > 0`, the script for `V` itself must
    /// exist; otherwise the database is ahead of this deployment and
    /// [`MigrationError::VersionMismatch`] is returned.
    pub fn update_existing(&self) -> MigrationResult<i32> {
        let conn = self.data_source.connection()?;
        with_transaction(conn.as_ref(), |db| {
            let initial = self
                .versions
                .get_version(db)?
                .ok_or(MigrationError::Uninitialized)?;

            let mut current = initial;
            while let Some(next) = current.checked_add(1) {
                if !self.update_to_version(db, next)? {
                    break;
                }
                current = next;
            }

            if current > initial {
                info!("Update complete, schema version set to {current}");
            } else {
                if current > 0 && !self.locator.has_upgrade_script(current)? {
                    return Err(MigrationError::VersionMismatch {
                        db_version: current,
                    });
                }
                info!("Schema already at version {current}, no update needed");
            }
            Ok(current)
        })
    }

    /// Initialize when no version table exists, update when the version is
    /// non-negative, and refuse a negative version.
    ///
    /// The state probe runs in its own rolled-back transaction; the chosen
    /// operation then runs in a fresh one.
    pub fn initialize_or_update(&self) -> MigrationResult<i32> {
        match self.probe_version()? {
            None => self.initialize_empty(),
            Some(version) if version >= 0 => self.update_existing(),
            Some(version) => Err(MigrationError::UndefinedState { version }),
        }
    }

    /// Current and latest versions, without changing anything.
    pub fn status(&self) -> MigrationResult<SchemaStatus> {
        let current = self.probe_version()?;
        let latest = self.locator.calculate_latest_version()?;
        Ok(SchemaStatus { current, latest })
    }

    fn probe_version(&self) -> MigrationResult<Option<i32>> {
        let conn = self.data_source.connection()?;
        with_rollback(conn.as_ref(), |db| Ok(self.versions.get_version(db)?))
    }

    /// One upgrade step: hook, script, version bump. Returns `false`
    /// without side effects when the script for `version` does not exist.
    fn update_to_version(&self, db: &dyn Database, version: i32) -> MigrationResult<bool> {
        let Some(script) = self.locator.find_upgrade_script(version)? else {
            return Ok(false);
        };

        info!("Updating schema to version {version}");
        self.hooks.try_apply(db, self.profile.dialect(), version)?;
        self.execute_script(db, &script)?;
        self.versions.set_version(db, version)?;
        info!("Schema updated to version {version}");
        Ok(true)
    }

    fn execute_script(&self, db: &dyn Database, script: &str) -> MigrationResult<()> {
        let family = self.profile.family();
        for statement in split_statements(script) {
            let statement = family.terminate_statement(&statement);
            debug!("Executing upgrade statement {statement}");
            db.execute(&statement)?;
        }
        Ok(())
    }
}

impl SchemaInitializer for Migrator {
    fn initialize_empty(&self) -> MigrationResult<Option<i32>> {
        Migrator::initialize_empty(self).map(Some)
    }

    fn update_existing(&self) -> MigrationResult<Option<i32>> {
        Migrator::update_existing(self).map(Some)
    }

    fn initialize_or_update(&self) -> MigrationResult<Option<i32>> {
        Migrator::initialize_or_update(self).map(Some)
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("profile", &self.profile)
            .field("locator", &self.locator)
            .field("versions", &self.versions)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
