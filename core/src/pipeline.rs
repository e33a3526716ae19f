//! Orchestration of the validation pipeline.
//!
//! One [`Validator`] is built at startup and shared read-only across
//! requests. Each call to [`Validator::validate`] resolves the checker
//! executable, extracts the archive, and runs the per-file loop:
//! stage, invoke, clean up, one atomic unit per candidate. A failure inside
//! one unit contributes one report line and never aborts the batch;
//! request-level failures short-circuit before any file is staged.

use crate::archive::Archive;
use crate::bindings::CheckerBindings;
use crate::candidate::CandidateFilter;
use crate::checker::{LintProcessChecker, SyntaxChecker, Verdict};
use crate::error::Result;
use crate::report::{CheckOutcome, ValidationReport};
use crate::stage::StagedFile;

/// One candidate selected from the archive, content already read.
///
/// Entry read failures are carried here rather than returned, so they fold
/// into the report as per-file lines like any other failure.
struct Candidate {
    entry_name: String,
    content: std::result::Result<Vec<u8>, String>,
}

/// Shared, immutable pipeline configuration and entry point.
#[derive(Debug, Clone)]
pub struct Validator {
    bindings: CheckerBindings,
    filter: CandidateFilter,
    jobs: usize,
}

impl Validator {
    /// Create a validator over the given bindings, with the default `.php`
    /// filter and sequential checking.
    #[must_use]
    pub fn new(bindings: CheckerBindings) -> Self {
        Self {
            bindings,
            filter: CandidateFilter::default(),
            jobs: 1,
        }
    }

    /// Replace the candidate filter.
    #[must_use]
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the number of concurrent checker invocations per request.
    ///
    /// Values below 1 are treated as 1. Report order is preserved
    /// regardless of this setting.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// The configured bindings table.
    #[must_use]
    pub fn bindings(&self) -> &CheckerBindings {
        &self.bindings
    }

    /// Validate every candidate file in `archive_bytes` with the checker
    /// bound to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownVersion`](crate::error::ValidationError::UnknownVersion)
    /// before anything is extracted or staged, and
    /// [`ValidationError::MalformedArchive`](crate::error::ValidationError::MalformedArchive)
    /// when the bytes are not a readable ZIP. Per-file failures are not
    /// errors; they appear as report lines.
    pub fn validate(&self, version: &str, archive_bytes: Vec<u8>) -> Result<ValidationReport> {
        let executable = self.bindings.resolve(version)?;
        let checker = LintProcessChecker::new(executable.to_owned());
        self.validate_with(&checker, archive_bytes)
    }

    /// Validate with an explicit checker capability.
    ///
    /// This is the seam used by tests to substitute a fake checker; the
    /// production path goes through [`Validator::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedArchive`](crate::error::ValidationError::MalformedArchive)
    /// when the bytes are not a readable ZIP.
    pub fn validate_with(
        &self,
        checker: &dyn SyntaxChecker,
        archive_bytes: Vec<u8>,
    ) -> Result<ValidationReport> {
        let mut archive = Archive::open(archive_bytes)?;
        let names: Vec<Option<String>> = (0..archive.len())
            .map(|index| archive.name_for_index(index).map(str::to_owned))
            .collect();

        let mut candidates: Vec<Candidate> = Vec::new();
        for (index, name) in names.into_iter().enumerate() {
            match name {
                Some(name) if self.filter.matches(&name) => candidates.push(Candidate {
                    content: archive.read_entry(index),
                    entry_name: name,
                }),
                // Not a candidate: intentionally skipped, never read or staged.
                Some(_) => {}
                // An in-range entry without a name cannot be filtered; give it
                // a positional name and a failure outcome rather than dropping
                // it from the report.
                None => candidates.push(Candidate {
                    entry_name: format!("entry #{index}"),
                    content: Err("unreadable entry name".to_owned()),
                }),
            }
        }

        log::debug!(
            "archive holds {} entries, {} candidate(s) match {}",
            archive.len(),
            candidates.len(),
            self.filter.suffix()
        );

        let outcomes = self.run_checks(checker, &candidates);
        Ok(ValidationReport::from_outcomes(outcomes))
    }

    /// Run the per-file loop, preserving candidate order in the outcomes.
    ///
    /// With `jobs > 1` the candidates are striped across scoped worker
    /// threads; outcomes come back index-tagged and are re-sorted, so
    /// completion order never leaks into the report.
    fn run_checks(
        &self,
        checker: &dyn SyntaxChecker,
        candidates: &[Candidate],
    ) -> Vec<CheckOutcome> {
        let worker_count = self.jobs.min(candidates.len());
        if worker_count <= 1 {
            return candidates
                .iter()
                .map(|candidate| check_one(checker, candidate))
                .collect();
        }

        let mut indexed: Vec<(usize, CheckOutcome)> = Vec::with_capacity(candidates.len());
        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..worker_count)
                .map(|worker| {
                    let stripe: Vec<(usize, &Candidate)> = candidates
                        .iter()
                        .enumerate()
                        .skip(worker)
                        .step_by(worker_count)
                        .collect();
                    scope.spawn(move || {
                        stripe
                            .into_iter()
                            .map(|(index, candidate)| (index, check_one(checker, candidate)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for worker in workers {
                match worker.join() {
                    Ok(batch) => indexed.extend(batch),
                    // check_one returns on every path, so a panic here is a
                    // bug; re-raise it rather than return a report that is
                    // silently missing this stripe's entries.
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        });
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

/// Stage one candidate, invoke the checker, and classify the result.
///
/// The staged temp file is dropped (and removed) before this returns, on
/// every path.
fn check_one(checker: &dyn SyntaxChecker, candidate: &Candidate) -> CheckOutcome {
    let content = match &candidate.content {
        Ok(content) => content,
        Err(reason) => {
            log::warn!("{}: unreadable archive entry: {reason}", candidate.entry_name);
            return CheckOutcome::fail(
                &candidate.entry_name,
                format!("cannot read archive entry: {reason}"),
            );
        }
    };

    let staged = match StagedFile::create(&candidate.entry_name, content) {
        Ok(staged) => staged,
        Err(e) => {
            log::warn!("{}: {e}", candidate.entry_name);
            return CheckOutcome::fail(&candidate.entry_name, e.to_string());
        }
    };

    match checker.check(staged.path()) {
        Verdict::Pass => CheckOutcome::pass(staged.entry_name()),
        Verdict::Fail { diagnostic } => CheckOutcome::fail(staged.entry_name(), diagnostic),
    }
}
