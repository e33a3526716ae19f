//! Request-level error types for the validation pipeline.
//!
//! Only conditions that invalidate the whole request live here. Failures
//! scoped to a single archive entry (staging, checker exit, entry read) are
//! folded into the report as per-file lines and never surface as errors.

use thiserror::Error;

/// Errors that abort a validation request before the per-file loop runs.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The caller-supplied version token has no checker binding.
    #[error("Cannot find given php version: {version}")]
    UnknownVersion {
        /// The unrecognised version token.
        version: String,
    },

    /// The uploaded bytes are not a readable ZIP archive.
    ///
    /// No entry can be trusted once the container itself fails to parse,
    /// so this is a request-level failure rather than a per-file line.
    #[error("Invalid zip given: {reason}")]
    MalformedArchive {
        /// Description of the underlying ZIP parse failure.
        reason: String,
    },
}

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;
