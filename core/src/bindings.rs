//! Immutable lookup table from PHP version tokens to checker executables.
//!
//! The table is fixed at construction time and shared read-only across
//! requests. Unknown tokens fail explicitly; there is no fallback version.

use crate::error::{Result, ValidationError};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Read-only mapping from a version token (e.g. `"8.1"`) to the checker
/// executable invoked for that version.
///
/// Executables may be bare names (resolved through `PATH` at spawn time) or
/// absolute paths. The map is deliberately not mutable after construction:
/// swapping bindings means building a new table, which keeps concurrent
/// request handling free of synchronisation.
#[derive(Debug, Clone)]
pub struct CheckerBindings {
    table: BTreeMap<String, Utf8PathBuf>,
}

impl CheckerBindings {
    /// Build a table from `(version, executable)` pairs.
    ///
    /// Later duplicates of a version token replace earlier ones.
    pub fn new<I, V, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (V, P)>,
        V: Into<String>,
        P: Into<Utf8PathBuf>,
    {
        let table = entries
            .into_iter()
            .map(|(version, executable)| (version.into(), executable.into()))
            .collect();
        Self { table }
    }

    /// The stock PHP bindings shipped with the service.
    #[must_use]
    pub fn php_defaults() -> Self {
        Self::new([
            ("7.2", "php7.2"),
            ("7.4", "php7.4"),
            ("8.1", "php8.1"),
        ])
    }

    /// Resolve a version token to its checker executable.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownVersion`] when the token has no
    /// binding.
    pub fn resolve(&self, version: &str) -> Result<&Utf8Path> {
        self.table
            .get(version)
            .map(Utf8PathBuf::as_path)
            .ok_or_else(|| ValidationError::UnknownVersion {
                version: version.to_owned(),
            })
    }

    /// Returns true when the token has a binding.
    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.table.contains_key(version)
    }

    /// Iterate over the known version tokens in sorted order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Number of configured bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true when no bindings are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for CheckerBindings {
    fn default() -> Self {
        Self::php_defaults()
    }
}
