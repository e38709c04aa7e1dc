//! Error types for the history walk
//!
//! Each layer has its own enum so a failure keeps the stage it came from:
//! VCS access, linter output interpretation, or the coordinator itself.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the version-control layer
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Repository is not cloned: clone or open it before walking history")]
    RepositoryNotCloned,

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Failed to checkout {commit}: {message}")]
    CheckoutFailed { commit: String, message: String },

    #[error("Unknown commit {0}")]
    UnknownCommit(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

/// Errors raised while interpreting a linter's output
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Output parsing failed: result template {marker:?} not found in {linter} output")]
    OutputParsingFailed { linter: String, marker: String },

    #[error("Failed to convert {value:?} to an error count: {source}")]
    InvalidCount {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors that abort a pipeline run
///
/// Variants name the stage that failed; the coordinator never retries.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Can't find supported linters")]
    NoSupportedLinters,

    #[error("Clone failed: {0}")]
    Clone(#[source] VcsError),

    #[error("Failed to enumerate commits: {0}")]
    History(#[source] VcsError),

    #[error("Checkout of commit {commit} failed: {source}")]
    Checkout {
        commit: String,
        #[source]
        source: VcsError,
    },

    #[error("Linter {linter} failed on commit {commit}: {source}")]
    Lint {
        commit: String,
        linter: String,
        #[source]
        source: LintError,
    },

    #[error("Failed to classify changes of commit {commit}: {source}")]
    Classify {
        commit: String,
        #[source]
        source: VcsError,
    },

    #[error("Scratch directory {}: {source}", path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Short name of the stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::NoSupportedLinters => "configuration",
            PipelineError::Clone(_) => "clone",
            PipelineError::History(_) => "history",
            PipelineError::Checkout { .. } => "checkout",
            PipelineError::Lint { .. } => "linting",
            PipelineError::Classify { .. } => "classification",
            PipelineError::Workspace { .. } => "workspace",
        }
    }
}
