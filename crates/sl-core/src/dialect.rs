//! Dialect profiles.
//!
//! A [`DialectProfile`] is built once from the configured dialect identifier,
//! the script directory name and the Azure flag. The [`DialectFamily`] chosen
//! at construction carries every dialect-specific rule the migration engine
//! needs: where the full-schema script lives, how the version table is
//! created, how table lookups are qualified and how statements are terminated.

use crate::error::{CoreError, CoreResult};
use std::borrow::Cow;

/// Closed set of dialect families with distinct migration behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectFamily {
    /// Microsoft SQL Server (script directory starts with `mssql`).
    ///
    /// `azure` selects the Azure SQL full-schema script and the clustered
    /// version table.
    SqlServer { azure: bool },
    /// Oracle (script directory ends with `ora`).
    Oracle,
    /// Apache Ignite (dialect identifier contains `Ignite`).
    Ignite,
    /// Everything else.
    Standard,
}

impl DialectFamily {
    /// Detect the family from the dialect identifier and script directory.
    ///
    /// The Azure flag only has an effect for the SQL Server family.
    pub fn detect(dialect: &str, dialect_dir: &str, azure: bool) -> Self {
        if dialect_dir.starts_with("mssql") {
            DialectFamily::SqlServer { azure }
        } else if dialect_dir.ends_with("ora") {
            DialectFamily::Oracle
        } else if dialect.contains("Ignite") {
            DialectFamily::Ignite
        } else {
            DialectFamily::Standard
        }
    }

    /// Whether this is the managed-cloud (Azure SQL) variant.
    pub fn is_azure(&self) -> bool {
        matches!(self, DialectFamily::SqlServer { azure: true })
    }

    /// File name of the full-schema script for `dialect_dir`.
    pub fn full_schema_file(&self, dialect_dir: &str) -> String {
        if self.is_azure() {
            format!("{dialect_dir}azure-schema.sql")
        } else {
            format!("{dialect_dir}-schema.sql")
        }
    }

    /// Statements that create the version table and seed its single row
    /// with version 0.
    pub fn version_table_ddl(&self, table: &str) -> Vec<String> {
        match self {
            DialectFamily::SqlServer { azure: true } => vec![
                format!(
                    "CREATE TABLE {table} (id INTEGER NOT NULL, version INTEGER NOT NULL, primary key clustered (id))"
                ),
                format!("INSERT INTO {table} (id, version) VALUES (1, 0)"),
            ],
            DialectFamily::Ignite => vec![
                format!(
                    "CREATE TABLE {table} (id INT PRIMARY KEY, version INTEGER NOT NULL) WITH \
                     \"template=replicated,atomicity=transactional_snapshot,cache_name={table}\""
                ),
                format!("INSERT INTO {table} (id, version) VALUES (1, 0)"),
            ],
            _ => vec![
                format!("CREATE TABLE {table} (version INTEGER NOT NULL)"),
                format!("INSERT INTO {table} (version) VALUES (0)"),
            ],
        }
    }

    /// Whether table-existence probes are restricted to the connection's
    /// current schema.
    pub fn qualifies_table_lookup(&self) -> bool {
        matches!(self, DialectFamily::Oracle)
    }

    /// Prepare a split statement for execution.
    ///
    /// PL/SQL blocks lose their terminating `;` in the splitter and Oracle
    /// rejects them without it, so statements ending in `END` get it back.
    pub fn terminate_statement<'a>(&self, statement: &'a str) -> Cow<'a, str> {
        if *self == DialectFamily::Oracle && ends_with_ignore_case(statement, "END") {
            Cow::Owned(format!("{statement};"))
        } else {
            Cow::Borrowed(statement)
        }
    }
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Dialect identifier, script directory and the family derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectProfile {
    dialect: String,
    dialect_dir: String,
    family: DialectFamily,
}

impl DialectProfile {
    /// Build a profile. The script directory must not be empty.
    pub fn new(
        dialect: impl Into<String>,
        dialect_dir: impl Into<String>,
        azure: bool,
    ) -> CoreResult<Self> {
        let dialect = dialect.into();
        let dialect_dir = dialect_dir.into();
        if dialect_dir.trim().is_empty() {
            return Err(CoreError::InvalidDialect {
                dialect,
                reason: "no script directory configured for this dialect".to_string(),
            });
        }
        let family = DialectFamily::detect(&dialect, &dialect_dir, azure);
        log::info!("Using script directory '{dialect_dir}' for dialect {dialect} ({family:?})");
        Ok(Self {
            dialect,
            dialect_dir,
            family,
        })
    }

    /// Dialect identifier handed to upgrade hooks.
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Name of the per-dialect script directory.
    pub fn dialect_dir(&self) -> &str {
        &self.dialect_dir
    }

    pub fn family(&self) -> DialectFamily {
        self.family
    }

    pub fn is_azure(&self) -> bool {
        self.family.is_azure()
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
