//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sl_migrate::SchemaStatus;
use std::fmt::Write as _;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{build_migrator, load_project, Project};

/// Status report printed by the command
#[derive(Debug, Serialize)]
pub(crate) struct StatusReport {
    pub dialect: String,
    pub dialect_dir: String,
    pub version_table: String,
    pub database: String,
    pub enabled: bool,
    pub current: Option<i32>,
    pub latest: i32,
    pub pending: i32,
    pub ahead: bool,
}

impl StatusReport {
    fn new(project: &Project, status: SchemaStatus) -> Self {
        Self {
            dialect: project.config.dialect.clone(),
            dialect_dir: project.config.dialect_dir.clone(),
            version_table: project.config.version_table.clone(),
            database: project.database_path(),
            enabled: project.config.enabled,
            current: status.current,
            latest: status.latest,
            pending: status.pending_steps(),
            ahead: status.is_ahead(),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let current = match self.current {
            Some(version) => version.to_string(),
            None => "uninitialized".to_string(),
        };

        let _ = writeln!(out, "Dialect:        {} ({})", self.dialect, self.dialect_dir);
        let _ = writeln!(out, "Database:       {}", self.database);
        let _ = writeln!(out, "Version table:  {}", self.version_table);
        let _ = writeln!(out, "Current:        {current}");
        let _ = writeln!(out, "Latest:         {}", self.latest);
        let _ = writeln!(out, "Pending steps:  {}", self.pending);

        if !self.enabled {
            let _ = writeln!(out, "\nSchema management is disabled in the config.");
        }
        if self.ahead {
            let _ = writeln!(
                out,
                "\nDatabase is ahead of the available scripts; updates will be refused."
            );
        }
        out
    }
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = build_migrator(&project)?;
    let status = migrator.status().context("Failed to read schema status")?;
    let report = StatusReport::new(&project, status);

    match args.output {
        StatusOutput::Text => print!("{}", report.to_text()),
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
