//! Command-line argument parsing and the run loop behind each binary

pub mod batchrename;
pub mod choose;
pub mod genpasswd;

use std::io::{self, Write};
use std::process::ExitCode;

use crate::selftest::{self, Check};

/// Result of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Conflicts, failed renames, failed self-tests, or nothing to choose from
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::from(1),
        }
    }
}

/// Map a run result to the process exit status.
///
/// Errors are printed on stderr and exit with 2: usage, configuration and
/// unrecoverable I/O errors.
pub fn finish(result: anyhow::Result<Outcome>) -> ExitCode {
    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::debug!(error = ?e, "Run failed");
            let _ = writeln!(io::stderr(), "error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Run built-in checks for `--test`
pub fn run_selftest<W: Write>(checks: &[Check], out: &mut W) -> io::Result<Outcome> {
    if selftest::run_checks(checks, out)? {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Failure)
    }
}
