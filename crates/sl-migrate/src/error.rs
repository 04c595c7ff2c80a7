//! Migration-specific error types

use crate::hooks::HookError;
use sl_db::DbError;
use thiserror::Error;

/// Errors raised by the migration engine
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A version table already exists (SL001)
    #[error("[SL001] Schema not empty, initialization aborted")]
    SchemaNotEmpty,

    /// No version table exists (SL002)
    #[error("[SL002] Schema is uninitialized, upgrade aborted")]
    Uninitialized,

    /// The recorded version is negative (SL003)
    #[error("[SL003] Database schema version is [{version}]. This state is undefined, manual upgrade necessary")]
    UndefinedState { version: i32 },

    /// An upgrade hook returned an error (SL004)
    #[error("[SL004] Upgrade hook for version {version} failed: {source}")]
    HookFailed {
        version: i32,
        #[source]
        source: HookError,
    },

    /// Two hooks were registered for the same version (SL005)
    #[error("[SL005] An upgrade hook for version {version} is already registered")]
    DuplicateHook { version: i32 },

    /// The database is ahead of the deployed scripts (SL006)
    #[error("[SL006] Database version {db_version} exceeds the version known to this deployment")]
    VersionMismatch { db_version: i32 },

    /// The full-schema script is missing (SL007)
    #[error("[SL007] Full schema script not found: {path}")]
    FullSchemaMissing { path: String },

    /// Script could not be read
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Database error, passed through unchanged
    #[error(transparent)]
    Database(#[from] DbError),
}

impl MigrationError {
    /// Whether this error belongs to the "database upgrade" family: an
    /// uninitialized or undefined schema state, or a failed upgrade hook.
    pub fn is_database_upgrade(&self) -> bool {
        matches!(
            self,
            MigrationError::Uninitialized
                | MigrationError::UndefinedState { .. }
                | MigrationError::HookFailed { .. }
        )
    }
}

/// Result type alias for MigrationError
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Errors raised while reading scripts from a [`ScriptSource`](crate::ScriptSource)
#[derive(Error, Debug)]
pub enum SourceError {
    /// Underlying read failed (SL101)
    #[error("[SL101] Failed to read script '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Script is not UTF-8 (SL102)
    #[error("[SL102] Script '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String },
}

/// Result type alias for SourceError
pub type SourceResult<T> = Result<T, SourceError>;
