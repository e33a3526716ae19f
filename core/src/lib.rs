//! Phpgate core validation pipeline.
//!
//! This crate accepts the raw bytes of an uploaded ZIP archive, selects the
//! entries that look like PHP sources, lints each one through an external
//! `php -l` style checker process, and aggregates the per-file diagnostics
//! into a single ordered report. It knows nothing about HTTP; the
//! `phpgate-server` crate adapts transport requests onto [`Validator`].
//!
//! # Modules
//!
//! - [`archive`] - In-memory ZIP extraction in stored entry order
//! - [`bindings`] - Immutable version-to-executable lookup table
//! - [`candidate`] - Suffix-based entry selection
//! - [`checker`] - External checker process capability and invocation
//! - [`error`] - Request-level error types
//! - [`pipeline`] - Orchestration of the per-file validation loop
//! - [`report`] - Outcome aggregation into the final report
//! - [`stage`] - Temporary-file staging with guaranteed cleanup

pub mod archive;
pub mod bindings;
pub mod candidate;
pub mod checker;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stage;

pub use bindings::CheckerBindings;
pub use error::{Result, ValidationError};
pub use pipeline::Validator;
pub use report::ValidationReport;
