//! Linters run against every checked-out commit
//!
//! A linter is a capability: it knows how to run its tool in a directory and
//! which marker precedes the error count in the tool's summary line. The
//! coordinator only depends on the [`Linter`] trait; concrete tools are built
//! from configuration through the [`LinterRegistry`].
//!
//! # Output convention
//!
//! Supported tools exit successfully with no output when there is nothing to
//! check, and exit non-zero with a `<marker><count>` summary when they found
//! issues. [`aggregate`] turns that into a [`LintOutcome`].

mod aggregate;
mod command;
mod cpplint;
mod registry;
mod runner;

pub use aggregate::aggregate;
pub use command::CommandLinter;
pub use cpplint::{cpplint, CPPLINT_RESULT_TEMPLATE};
pub use registry::{LinterFactory, LinterRegistry};
pub use runner::run_command;

use crate::error::LintError;
use std::fmt;
use std::path::Path;

/// Why a linter process did not finish cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The process ran and exited with a non-zero status
    Exit { code: Option<i32> },
    /// The process could not be started
    Spawn { message: String },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Exit { code: Some(code) } => write!(f, "exit status {}", code),
            RunError::Exit { code: None } => write!(f, "terminated by signal"),
            RunError::Spawn { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RunError {}

/// Raw result of one linter invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintRunResult {
    /// Combined stdout and stderr
    pub output: Vec<u8>,
    pub error: Option<RunError>,
}

impl LintRunResult {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(output: impl Into<Vec<u8>>, error: RunError) -> Self {
        Self {
            output: output.into(),
            error: Some(error),
        }
    }
}

/// Interpreted linter result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// The tool checked files and reported this many errors
    Normal(u64),
    /// The tool found no files it applies to
    NoMatchingFiles,
}

impl LintOutcome {
    /// Contribution to a commit's error total
    pub fn count(&self) -> u64 {
        match self {
            LintOutcome::Normal(count) => *count,
            LintOutcome::NoMatchingFiles => 0,
        }
    }
}

/// A static-analysis tool the pipeline can run
pub trait Linter {
    /// Tool identifier, used in logs and errors
    fn name(&self) -> &str;

    /// Marker that precedes the error count in the tool's summary
    fn result_template(&self) -> &[u8];

    /// Run the tool against the files in `directory`
    fn run(&self, directory: &Path) -> LintRunResult;

    /// Interpret a finished run
    fn parse_output(&self, result: &LintRunResult) -> Result<LintOutcome, LintError> {
        aggregate(
            self.name(),
            &result.output,
            result.error.as_ref(),
            self.result_template(),
        )
    }
}
