//! Configuration types and parsing for schemalift.yml

use crate::dialect::DialectProfile;
use crate::error::{CoreError, CoreResult};
use crate::sql_utils::is_valid_table_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from schemalift.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dialect identifier, handed to upgrade hooks and used for family
    /// detection
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Per-dialect script directory name (e.g. `pg`, `mssql`, `ora`)
    pub dialect_dir: String,

    /// Target the managed-cloud (Azure SQL) variant of SQL Server
    #[serde(default)]
    pub azure: bool,

    /// Name of the single-row version table
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// Directory containing the `schema/` script tree, relative to the
    /// project root
    #[serde(default = "default_scripts_path")]
    pub scripts_path: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Manage the schema at all; when false every command is a no-op
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

const CONFIG_FILE_NAMES: [&str; 2] = ["schemalift.yml", "schemalift.yaml"];

fn default_dialect() -> String {
    "duckdb".to_string()
}

fn default_version_table() -> String {
    "schema_version".to_string()
}

fn default_scripts_path() -> String {
    ".".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Load configuration from a project directory
    /// Looks for schemalift.yml or schemalift.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.dialect_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "dialect_dir cannot be empty".to_string(),
            });
        }

        if !is_valid_table_name(&self.version_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "version_table '{}' must be a plain identifier, optionally prefixed with a schema",
                    self.version_table
                ),
            });
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Build the dialect profile described by this configuration
    pub fn dialect_profile(&self) -> CoreResult<DialectProfile> {
        DialectProfile::new(&self.dialect, &self.dialect_dir, self.azure)
    }

    /// Get the absolute scripts root relative to a project root
    pub fn scripts_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.scripts_path)
    }

    /// Resolve the database path relative to a project root.
    ///
    /// `:memory:` and absolute paths are returned unchanged.
    pub fn database_path(&self, root: &Path) -> String {
        if self.database.path == DEFAULT_DB_PATH || Path::new(&self.database.path).is_absolute() {
            self.database.path.clone()
        } else {
            root.join(&self.database.path).display().to_string()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
