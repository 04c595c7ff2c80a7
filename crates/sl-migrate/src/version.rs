//! Version table access.
//!
//! The version table holds exactly one row with one integer column,
//! `version`. Its presence is what marks a schema as initialized.

use sl_core::sql_utils::split_qualified_name;
use sl_core::DialectFamily;
use sl_db::{Database, DbResult};

/// Reads and writes the schema version for one dialect family.
#[derive(Debug, Clone)]
pub struct VersionStore {
    table: String,
    family: DialectFamily,
}

impl VersionStore {
    pub fn new(table: impl Into<String>, family: DialectFamily) -> Self {
        Self {
            table: table.into(),
            family,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Probe for the version table.
    ///
    /// Catalogs disagree on identifier case, so the name is tried as given,
    /// then lower-cased, then upper-cased. An explicit `schema.` prefix is
    /// folded the same way; without one, Oracle restricts the probe to the
    /// connection's current schema.
    pub fn table_exists(&self, db: &dyn Database) -> DbResult<bool> {
        let (explicit_schema, table) = split_qualified_name(&self.table);

        let current_schema = match explicit_schema {
            None if self.family.qualifies_table_lookup() => db.current_schema()?,
            _ => None,
        };

        for (schema, name) in case_variants(explicit_schema, table) {
            let schema = schema.or_else(|| current_schema.clone());
            if db.table_exists(schema.as_deref(), &name)? {
                log::debug!("Found version table as '{name}'");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Current schema version, or `None` when the version table is absent.
    ///
    /// A table with no row reads as version 0.
    pub fn get_version(&self, db: &dyn Database) -> DbResult<Option<i32>> {
        if !self.table_exists(db)? {
            return Ok(None);
        }
        let version = db
            .query_optional_i32(&format!("SELECT version FROM {}", self.table))?
            .unwrap_or(0);
        Ok(Some(version))
    }

    /// Create the version table and seed it with version 0.
    pub fn create_version_table(&self, db: &dyn Database) -> DbResult<()> {
        for statement in self.family.version_table_ddl(&self.table) {
            log::debug!("Executing version table statement {statement}");
            db.execute(&statement)?;
        }
        Ok(())
    }

    pub fn set_version(&self, db: &dyn Database, version: i32) -> DbResult<()> {
        db.execute(&format!("UPDATE {} SET version = {version}", self.table))?;
        Ok(())
    }
}

/// As-given, lower and upper spellings, duplicates removed, order kept.
fn case_variants(schema: Option<&str>, table: &str) -> Vec<(Option<String>, String)> {
    let candidates = [
        (schema.map(str::to_string), table.to_string()),
        (
            schema.map(str::to_ascii_lowercase),
            table.to_ascii_lowercase(),
        ),
        (
            schema.map(str::to_ascii_uppercase),
            table.to_ascii_uppercase(),
        ),
    ];

    let mut variants: Vec<(Option<String>, String)> = Vec::with_capacity(3);
    for candidate in candidates {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
