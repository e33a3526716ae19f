//! Temporary-file staging for checker invocations.
//!
//! External checkers take a filesystem path, so each candidate's bytes are
//! copied into a uniquely named temp file first. The [`StagedFile`] owns
//! that file for exactly one validation attempt; dropping it removes the
//! file on every exit path, including checker launch failures and panics
//! unwinding through the per-file loop.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure to materialise one candidate into a temp file.
///
/// Scoped to a single file: the batch continues and the failure becomes one
/// report line for the affected entry.
#[derive(Debug, Error)]
#[error("staging failed: {source}")]
pub struct StagingError {
    #[from]
    source: std::io::Error,
}

/// One archive entry materialised on disk for a checker run.
pub struct StagedFile {
    entry_name: String,
    // Removal on drop is the cleanup guarantee; never call keep().
    file: NamedTempFile,
}

impl StagedFile {
    /// Copy `content` into a fresh uniquely named temp file.
    ///
    /// Names are generated by the `tempfile` crate and are collision-free
    /// across concurrently staged candidates.
    ///
    /// # Errors
    ///
    /// Returns [`StagingError`] when the file cannot be created or written.
    pub fn create(entry_name: &str, content: &[u8]) -> Result<Self, StagingError> {
        let mut file = tempfile::Builder::new()
            .prefix("php-syntax-check-")
            .suffix(".php")
            .tempfile()?;
        file.write_all(content)?;
        file.flush()?;
        Ok(Self {
            entry_name: entry_name.to_owned(),
            file,
        })
    }

    /// The staged file's path, suitable as a checker process argument.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The archive entry this staging belongs to.
    #[must_use]
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }
}
