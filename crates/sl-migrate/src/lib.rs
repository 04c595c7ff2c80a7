//! sl-migrate - Schema migration engine for Schemalift
//!
//! Brings a database schema to the latest known version, either by applying
//! the full-schema script to an empty database or by stepping an existing
//! database forward one numbered upgrade at a time. Every operation runs in
//! a single transaction: it either commits completely or leaves the database
//! untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sl_core::DialectProfile;
//! use sl_db::DuckDbDataSource;
//! use sl_migrate::{DirectorySource, HookRegistry, Migrator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let profile = DialectProfile::new("duckdb", "duckdb", false)?;
//! let migrator = Migrator::new(
//!     Arc::new(DuckDbDataSource::new("app.duckdb")?),
//!     profile,
//!     Arc::new(DirectorySource::new("resources")),
//!     "schema_version",
//! )
//! .with_hooks(HookRegistry::new());
//!
//! let version = migrator.initialize_or_update()?;
//! println!("schema at version {version}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod hooks;
pub mod locator;
pub mod migrator;
pub mod source;
pub mod version;

pub use error::{MigrationError, MigrationResult, SourceError, SourceResult};
pub use hooks::{HookError, HookRegistry, HookResult, HookTier, UpgradeHook};
pub use locator::ScriptLocator;
pub use migrator::{Migrator, NoopInitializer, SchemaInitializer, SchemaStatus};
pub use source::{DirectorySource, EmbeddedSource, MemorySource, ScriptSource};
pub use version::VersionStore;
