//! Upgrade hooks.
//!
//! A hook is code that runs inside the upgrade transaction just before the
//! SQL script for its version, for changes SQL alone cannot express (data
//! rewrites, backfills). Hooks are registered per target version in two
//! tiers: current hooks take precedence over deprecated ones, which are kept
//! only so that old databases can still be stepped through.

use crate::error::{MigrationError, MigrationResult};
use sl_db::Database;
use std::collections::BTreeMap;

/// Error type returned by hooks
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for hook bodies
pub type HookResult<T> = Result<T, HookError>;

/// Code run before the upgrade script of one version.
pub trait UpgradeHook: Send + Sync {
    /// Apply the hook on the open transaction's connection.
    ///
    /// `dialect` is the configured dialect identifier. The returned flag
    /// reports whether the hook did anything; it is informational only.
    fn upgrade(&self, db: &dyn Database, dialect: &str) -> HookResult<bool>;
}

impl<F> UpgradeHook for F
where
    F: Fn(&dyn Database, &str) -> HookResult<bool> + Send + Sync,
{
    fn upgrade(&self, db: &dyn Database, dialect: &str) -> HookResult<bool> {
        self(db, dialect)
    }
}

/// Which tier a resolved hook came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTier {
    Current,
    Deprecated,
}

impl std::fmt::Display for HookTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookTier::Current => write!(f, "current"),
            HookTier::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Version-keyed upgrade hooks.
#[derive(Default)]
pub struct HookRegistry {
    current: BTreeMap<i32, Box<dyn UpgradeHook>>,
    deprecated: BTreeMap<i32, Box<dyn UpgradeHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the current hook for `version`.
    pub fn register(
        &mut self,
        version: i32,
        hook: impl UpgradeHook + 'static,
    ) -> MigrationResult<()> {
        Self::insert(&mut self.current, version, Box::new(hook))
    }

    /// Register a deprecated hook for `version`, used only when no current
    /// hook exists for it.
    pub fn register_deprecated(
        &mut self,
        version: i32,
        hook: impl UpgradeHook + 'static,
    ) -> MigrationResult<()> {
        Self::insert(&mut self.deprecated, version, Box::new(hook))
    }

    fn insert(
        tier: &mut BTreeMap<i32, Box<dyn UpgradeHook>>,
        version: i32,
        hook: Box<dyn UpgradeHook>,
    ) -> MigrationResult<()> {
        if tier.contains_key(&version) {
            return Err(MigrationError::DuplicateHook { version });
        }
        tier.insert(version, hook);
        Ok(())
    }

    /// Resolve the hook for `version`: current first, then deprecated.
    pub fn resolve(&self, version: i32) -> Option<(&dyn UpgradeHook, HookTier)> {
        if let Some(hook) = self.current.get(&version) {
            return Some((hook.as_ref(), HookTier::Current));
        }
        self.deprecated
            .get(&version)
            .map(|hook| (hook.as_ref(), HookTier::Deprecated))
    }

    /// Run the hook for `version`, if any. Returns whether one ran.
    pub fn try_apply(
        &self,
        db: &dyn Database,
        dialect: &str,
        version: i32,
    ) -> MigrationResult<bool> {
        let Some((hook, tier)) = self.resolve(version) else {
            return Ok(false);
        };

        log::info!("Running {tier} upgrade hook for version {version}");
        let changed = hook
            .upgrade(db, dialect)
            .map_err(|source| MigrationError::HookFailed { version, source })?;
        log::debug!("Upgrade hook for version {version} finished (changed: {changed})");
        Ok(true)
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("current", &self.current.keys().collect::<Vec<_>>())
            .field("deprecated", &self.deprecated.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
