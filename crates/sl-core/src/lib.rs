//! sl-core - Core library for Schemalift
//!
//! This crate provides the shared pieces used by the migration engine and the
//! CLI: project configuration parsing, dialect profiles, the blank-line script
//! splitter, and identifier helpers.

pub mod config;
pub mod dialect;
pub mod error;
pub mod script;
pub mod sql_utils;

pub use config::{Config, DatabaseConfig, DbType};
pub use dialect::{DialectFamily, DialectProfile};
pub use error::{CoreError, CoreResult};
pub use script::split_statements;
