//! Init, update and migrate commands

use anyhow::{Context, Result};
use sl_migrate::SchemaInitializer;

use crate::cli::GlobalArgs;
use crate::commands::common::{build_initializer, load_project};

/// Schema operation selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    InitializeEmpty,
    UpdateExisting,
    InitializeOrUpdate,
}

impl Operation {
    fn run(self, initializer: &dyn SchemaInitializer) -> Result<Option<i32>> {
        let result = match self {
            Operation::InitializeEmpty => initializer.initialize_empty(),
            Operation::UpdateExisting => initializer.update_existing(),
            Operation::InitializeOrUpdate => initializer.initialize_or_update(),
        };
        result.with_context(|| format!("Schema {} failed", self.description()))
    }

    fn description(self) -> &'static str {
        match self {
            Operation::InitializeEmpty => "initialization",
            Operation::UpdateExisting => "update",
            Operation::InitializeOrUpdate => "migration",
        }
    }
}

/// Execute one of the schema-changing commands
pub(crate) fn execute(operation: Operation, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let initializer = build_initializer(&project)?;

    match operation.run(initializer.as_ref())? {
        Some(version) => println!("Schema at version {version}"),
        None => println!("Schema management disabled, nothing to do"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
