//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use sl_core::{Config, DbType};
use sl_db::DuckDbDataSource;
use sl_migrate::{DirectorySource, Migrator, NoopInitializer, SchemaInitializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Loaded configuration plus the directory relative paths resolve against.
#[derive(Debug)]
pub(crate) struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub(crate) fn database_path(&self) -> String {
        self.config.database_path(&self.root)
    }

    pub(crate) fn scripts_root(&self) -> PathBuf {
        self.config.scripts_path_absolute(&self.root)
    }
}

/// Load the project configuration, applying command-line overrides.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);

    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load configuration")?;

    if let Some(database) = &global.database {
        if database.trim().is_empty() {
            bail!("--database cannot be empty");
        }
        config.database.path = database.clone();
    }

    Ok(Project { root, config })
}

/// Build a migrator over the project's scripts directory and database.
pub(crate) fn build_migrator(project: &Project) -> Result<Migrator> {
    let profile = project
        .config
        .dialect_profile()
        .context("Invalid dialect configuration")?;

    let db_path = project.database_path();
    let data_source = match project.config.database.db_type {
        DbType::DuckDb => DuckDbDataSource::new(&db_path)
            .with_context(|| format!("Failed to open database: {db_path}"))?,
    };

    let scripts_root = project.scripts_root();
    log::debug!(
        "Using scripts under {} against {} database {db_path}",
        scripts_root.display(),
        project.config.database.db_type
    );

    Ok(Migrator::new(
        Arc::new(data_source),
        profile,
        Arc::new(DirectorySource::new(scripts_root)),
        project.config.version_table.clone(),
    ))
}

/// The initializer for this project: a migrator, or a no-op when schema
/// management is disabled in the config.
pub(crate) fn build_initializer(project: &Project) -> Result<Box<dyn SchemaInitializer>> {
    if !project.config.enabled {
        return Ok(Box::new(NoopInitializer));
    }
    Ok(Box::new(build_migrator(project)?))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
