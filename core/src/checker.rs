//! External syntax checker invocation.
//!
//! Checking a file means spawning a separate checker process in lint-only
//! mode and classifying its exit status. The capability is behind a trait so
//! the pipeline can be exercised in tests without spawning anything.

use camino::{Utf8Path, Utf8PathBuf};
use std::path::Path;
use std::process::{Command, Output};

/// Result of one checker run over one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The checker exited zero: the file is syntactically valid.
    Pass,
    /// The checker exited nonzero or could not be started.
    Fail {
        /// Captured combined output, or the launch error text.
        diagnostic: String,
    },
}

/// Capability to syntax-check one file on disk.
///
/// Implementations must be shareable across the worker threads of a single
/// request. There is no retry semantic: a failed invocation is a permanent
/// failure for that file within its request.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
pub trait SyntaxChecker: Send + Sync {
    /// Check the file at `source` and classify the result.
    fn check(&self, source: &Path) -> Verdict;
}

/// Production checker: spawns `<executable> -l <source>`.
///
/// The executable comes from the request's resolved
/// [`CheckerBindings`](crate::bindings::CheckerBindings) entry; bare names
/// resolve through `PATH` at spawn time.
#[derive(Debug, Clone)]
pub struct LintProcessChecker {
    executable: Utf8PathBuf,
}

impl LintProcessChecker {
    /// Create a checker bound to one executable.
    #[must_use]
    pub fn new(executable: impl Into<Utf8PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// The bound executable.
    #[must_use]
    pub fn executable(&self) -> &Utf8Path {
        &self.executable
    }
}

impl SyntaxChecker for LintProcessChecker {
    fn check(&self, source: &Path) -> Verdict {
        let spawned = Command::new(self.executable.as_std_path())
            .arg("-l")
            .arg(source)
            .output();

        match spawned {
            Err(e) => Verdict::Fail {
                diagnostic: format!("cannot run {}: {e}", self.executable),
            },
            Ok(output) if output.status.success() => Verdict::Pass,
            Ok(output) => Verdict::Fail {
                diagnostic: combined_output(&output),
            },
        }
    }
}

/// Merge captured stdout and stderr into one trimmed diagnostic string.
///
/// Checkers differ on which stream carries the parse error, so both are
/// kept, stdout first.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut diagnostic = String::with_capacity(stdout.len() + stderr.len() + 1);
    diagnostic.push_str(stdout.trim());
    if !stderr.trim().is_empty() {
        if !diagnostic.is_empty() {
            diagnostic.push('\n');
        }
        diagnostic.push_str(stderr.trim());
    }
    diagnostic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        /// Write an executable shell script and return its path.
        fn script(dir: &tempfile::TempDir, name: &str, body: &str) -> Utf8PathBuf {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).expect("create script");
            writeln!(file, "#!/bin/sh\n{body}").expect("write script");
            let mut perms = file.metadata().expect("metadata").permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).expect("chmod script");
            Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
        }

        #[test]
        fn zero_exit_is_a_pass() {
            let dir = tempfile::tempdir().expect("temp dir");
            let checker = LintProcessChecker::new(script(&dir, "ok-lint", "exit 0"));
            let verdict = checker.check(Path::new("/dev/null"));
            assert_eq!(verdict, Verdict::Pass);
        }

        #[test]
        fn nonzero_exit_fails_with_combined_output() {
            let dir = tempfile::tempdir().expect("temp dir");
            let checker = LintProcessChecker::new(script(
                &dir,
                "bad-lint",
                "echo 'Parse error'\necho 'on line 3' >&2\nexit 255",
            ));
            let verdict = checker.check(Path::new("/dev/null"));
            assert_eq!(
                verdict,
                Verdict::Fail {
                    diagnostic: "Parse error\non line 3".to_owned()
                }
            );
        }

        #[test]
        fn checker_receives_lint_flag_and_source_path() {
            let dir = tempfile::tempdir().expect("temp dir");
            // Fails unless invoked as `<script> -l <path>`.
            let checker = LintProcessChecker::new(script(
                &dir,
                "argv-lint",
                "[ \"$1\" = \"-l\" ] && [ -n \"$2\" ] && exit 0\nexit 1",
            ));
            let verdict = checker.check(Path::new("/dev/null"));
            assert_eq!(verdict, Verdict::Pass);
        }
    }

    #[test]
    fn launch_failure_names_the_executable() {
        let checker = LintProcessChecker::new("/nonexistent/php-binary");
        let verdict = checker.check(Path::new("/dev/null"));
        match verdict {
            Verdict::Fail { diagnostic } => {
                assert!(diagnostic.contains("/nonexistent/php-binary"));
            }
            Verdict::Pass => panic!("missing executable must not pass"),
        }
    }

    #[test]
    fn combined_output_keeps_stdout_before_stderr() {
        #[cfg(unix)]
        fn status(code: i32) -> std::process::ExitStatus {
            use std::os::unix::process::ExitStatusExt;
            std::process::ExitStatus::from_raw(code << 8)
        }
        #[cfg(windows)]
        fn status(code: i32) -> std::process::ExitStatus {
            use std::os::windows::process::ExitStatusExt;
            std::process::ExitStatus::from_raw(code as u32)
        }

        let output = Output {
            status: status(1),
            stdout: b"first\n".to_vec(),
            stderr: b"second\n".to_vec(),
        };
        assert_eq!(combined_output(&output), "first\nsecond");
    }
}
