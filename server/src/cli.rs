//! CLI argument definitions for the phpgate server.
//!
//! Separated from the entrypoint so the configuration surface can be
//! constructed and validated in tests without touching the network.

use camino::Utf8PathBuf;
use clap::Parser;
use phpgate_core::{CheckerBindings, Validator};
use phpgate_core::candidate::CandidateFilter;
use std::net::SocketAddr;
use thiserror::Error;

/// Serve batch PHP syntax validation over HTTP.
#[derive(Parser, Debug)]
#[command(name = "phpgate-server")]
#[command(version, about)]
#[command(long_about = concat!(
    "Serve batch PHP syntax validation over HTTP.\n\n",
    "Clients POST a multipart/form-data body with a single `file` field ",
    "holding a ZIP archive to /v1/validate?version=<token>. Every entry ",
    "matching the candidate suffix is linted through the checker executable ",
    "bound to that version, and the per-file diagnostics come back as ",
    "{\"errors\": [...]}.\n\n",
    "The stock binding table maps 7.2, 7.4 and 8.1 to php7.2, php7.4 and ",
    "php8.1 on PATH; pass --binding to replace it.",
))]
pub struct Cli {
    /// Socket address to listen on.
    #[arg(short, long, value_name = "ADDR", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Checker binding as VERSION=EXECUTABLE (repeatable).
    ///
    /// When given at least once, the stock table is replaced entirely.
    #[arg(short, long, value_name = "VERSION=EXECUTABLE")]
    pub binding: Vec<String>,

    /// Concurrent checker invocations per request.
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Candidate filename suffix (case-sensitive).
    #[arg(long, value_name = "SUFFIX", default_value = ".php")]
    pub suffix: String,

    /// Maximum accepted request body size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

/// A `--binding` value that is not of the form `VERSION=EXECUTABLE`.
#[derive(Debug, Error)]
#[error("invalid --binding {value:?}: expected VERSION=EXECUTABLE")]
pub struct InvalidBinding {
    /// The offending argument value.
    pub value: String,
}

impl Cli {
    /// Build the binding table from `--binding` flags, or the stock table
    /// when none were given.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBinding`] for any flag missing the `=` separator or
    /// with an empty version or executable part.
    pub fn bindings(&self) -> Result<CheckerBindings, InvalidBinding> {
        if self.binding.is_empty() {
            return Ok(CheckerBindings::php_defaults());
        }

        let mut entries: Vec<(String, Utf8PathBuf)> = Vec::with_capacity(self.binding.len());
        for raw in &self.binding {
            let (version, executable) =
                raw.split_once('=').ok_or_else(|| InvalidBinding {
                    value: raw.clone(),
                })?;
            if version.is_empty() || executable.is_empty() {
                return Err(InvalidBinding { value: raw.clone() });
            }
            entries.push((version.to_owned(), Utf8PathBuf::from(executable)));
        }
        Ok(CheckerBindings::new(entries))
    }

    /// Build the configured validator.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBinding`] when a `--binding` flag is malformed.
    pub fn validator(&self) -> Result<Validator, InvalidBinding> {
        Ok(Validator::new(self.bindings()?)
            .with_filter(CandidateFilter::new(self.suffix.clone()))
            .with_jobs(self.jobs))
    }
}
