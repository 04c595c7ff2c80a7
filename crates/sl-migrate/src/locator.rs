//! Script locator.
//!
//! Resolves the three kinds of scripts for one dialect directory:
//!
//! ```text
//! schema/<full-schema file>             full schema at the latest version
//! schema/upgrades/<dialect_dir>/<N>.sql step from version N-1 to N
//! schema/additional/<dialect_dir>/add.sql  optional, after initialization
//! ```

use crate::error::{MigrationError, MigrationResult, SourceResult};
use crate::source::ScriptSource;
use sl_core::DialectProfile;
use std::sync::Arc;

/// Finds migration scripts for a dialect in a [`ScriptSource`].
#[derive(Clone)]
pub struct ScriptLocator {
    source: Arc<dyn ScriptSource>,
    upgrades_dir: String,
    additional_script: String,
    full_schema_script: String,
}

impl ScriptLocator {
    pub fn new(source: Arc<dyn ScriptSource>, profile: &DialectProfile) -> Self {
        let dir = profile.dialect_dir();
        Self {
            source,
            upgrades_dir: format!("schema/upgrades/{dir}"),
            additional_script: format!("schema/additional/{dir}/add.sql"),
            full_schema_script: format!("schema/{}", profile.family().full_schema_file(dir)),
        }
    }

    /// Logical path of the upgrade script for `version`.
    pub fn upgrade_script_path(&self, version: i32) -> String {
        format!("{}/{version}.sql", self.upgrades_dir)
    }

    pub fn full_schema_path(&self) -> &str {
        &self.full_schema_script
    }

    pub fn additional_script_path(&self) -> &str {
        &self.additional_script
    }

    pub fn has_upgrade_script(&self, version: i32) -> SourceResult<bool> {
        self.source.exists(&self.upgrade_script_path(version))
    }

    /// Contents of the upgrade script for `version`, if one exists.
    pub fn find_upgrade_script(&self, version: i32) -> SourceResult<Option<String>> {
        self.source.read(&self.upgrade_script_path(version))
    }

    /// Contents of the full-schema script. Its absence is an error.
    pub fn find_full_schema_script(&self) -> MigrationResult<String> {
        self.source
            .read(&self.full_schema_script)?
            .ok_or_else(|| MigrationError::FullSchemaMissing {
                path: self.full_schema_script.clone(),
            })
    }

    pub fn find_additional_script(&self) -> SourceResult<Option<String>> {
        self.source.read(&self.additional_script)
    }

    /// Highest N such that upgrade scripts 1..=N all exist.
    ///
    /// Probing stops at the first gap, so a stray `7.sql` after a missing
    /// `5.sql` is never counted. Returns 0 when `1.sql` is absent.
    pub fn calculate_latest_version(&self) -> SourceResult<i32> {
        let mut version = 0;
        while self.has_upgrade_script(version + 1)? {
            version += 1;
        }
        log::debug!("Latest available schema version is {version}");
        Ok(version)
    }
}

impl std::fmt::Debug for ScriptLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptLocator")
            .field("upgrades_dir", &self.upgrades_dir)
            .field("additional_script", &self.additional_script)
            .field("full_schema_script", &self.full_schema_script)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
