//! Script sources.
//!
//! A [`ScriptSource`] answers "does this script exist" and "what does it
//! contain" for logical, `/`-separated paths such as
//! `schema/upgrades/pg/3.sql`. The engine never touches storage directly, so
//! scripts can live on disk, in a bundle embedded at compile time, or in
//! memory.

use crate::error::{SourceError, SourceResult};
use rust_embed::Embed;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Storage-agnostic access to migration scripts.
pub trait ScriptSource: Send + Sync {
    /// Read the script at `path`, or `None` when it does not exist.
    fn read(&self, path: &str) -> SourceResult<Option<String>>;

    /// Check whether a script exists at `path`.
    fn exists(&self, path: &str) -> SourceResult<bool> {
        Ok(self.read(path)?.is_some())
    }
}

fn decode(path: &str, bytes: Vec<u8>) -> SourceResult<String> {
    String::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8 {
        path: path.to_string(),
    })
}

/// Scripts stored under a filesystem directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl ScriptSource for DirectorySource {
    fn read(&self, path: &str) -> SourceResult<Option<String>> {
        let file = self.resolve(path);
        match std::fs::read(&file) {
            Ok(bytes) => decode(path, bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Io {
                path: file.display().to_string(),
                source: e,
            }),
        }
    }

    fn exists(&self, path: &str) -> SourceResult<bool> {
        Ok(self.resolve(path).is_file())
    }
}

/// Scripts embedded in the binary with `rust-embed`.
///
/// ```rust,ignore
/// #[derive(rust_embed::Embed)]
/// #[folder = "resources/"]
/// struct Scripts;
///
/// let source = EmbeddedSource::<Scripts>::new();
/// ```
pub struct EmbeddedSource<E: Embed> {
    _bundle: PhantomData<fn() -> E>,
}

impl<E: Embed> EmbeddedSource<E> {
    pub fn new() -> Self {
        Self {
            _bundle: PhantomData,
        }
    }
}

impl<E: Embed> Default for EmbeddedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Embed> ScriptSource for EmbeddedSource<E> {
    fn read(&self, path: &str) -> SourceResult<Option<String>> {
        match E::get(path) {
            Some(file) => decode(path, file.data.into_owned()).map(Some),
            None => Ok(None),
        }
    }

    fn exists(&self, path: &str) -> SourceResult<bool> {
        Ok(E::get(path).is_some())
    }
}

/// Scripts held in memory, keyed by logical path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    scripts: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script, builder style.
    pub fn with_script(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a script.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.scripts.insert(path.into(), contents.into());
    }
}

impl ScriptSource for MemorySource {
    fn read(&self, path: &str) -> SourceResult<Option<String>> {
        Ok(self.scripts.get(path).cloned())
    }

    fn exists(&self, path: &str) -> SourceResult<bool> {
        Ok(self.scripts.contains_key(path))
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
