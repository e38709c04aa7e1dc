//! History walk pipeline
//!
//! Replays a repository oldest commit first:
//! 1. Check the commit out
//! 2. Run every configured linter and sum the error counts
//! 3. Classify file changes against the first parent
//! 4. Append a record
//!
//! The first unrecovered failure ends the walk and no partial report is
//! returned.

use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::PipelineError;
use crate::history::HistoryWalker;
use crate::lint::{LintOutcome, Linter};
use crate::models::{CommitRecord, CommitRef, PipelineReport};
use crate::vcs::Vcs;

/// Sequential commit-by-commit analysis.
pub struct Pipeline {
    linters: Vec<Box<dyn Linter>>,
    progress: ProgressBar,
}

impl Pipeline {
    /// Create a pipeline. At least one linter is required.
    pub fn new(linters: Vec<Box<dyn Linter>>) -> Result<Self, PipelineError> {
        if linters.is_empty() {
            return Err(PipelineError::NoSupportedLinters);
        }
        Ok(Self {
            linters,
            progress: ProgressBar::hidden(),
        })
    }

    /// Report progress (one tick per commit) on `bar`.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Names of the configured linters, in run order
    pub fn linter_names(&self) -> Vec<&str> {
        self.linters.iter().map(|l| l.name()).collect()
    }

    /// Walk the whole history of `vcs`.
    pub fn run<V: Vcs + ?Sized>(&self, vcs: &mut V) -> Result<PipelineReport, PipelineError> {
        let mut walker = HistoryWalker::new(vcs);

        let commits = walker.enumerate_commits().map_err(|e| {
            error!("Failed to get commits: {}", e);
            PipelineError::History(e)
        })?;
        let workdir = walker
            .workdir()
            .map_err(PipelineError::History)?
            .to_path_buf();

        info!(
            commits = commits.len(),
            linters = self.linters.len(),
            workdir = %workdir.display(),
            "Walking history"
        );
        self.progress.set_length(commits.len() as u64);

        let mut report = PipelineReport::with_capacity(commits.len());
        // Enumerated newest first; replay in reverse.
        for (position, commit) in commits.iter().rev().enumerate() {
            debug!(commit = %commit.short_id(), position = position + 1, total = commits.len(), "Visiting commit");
            self.progress.set_message(commit.short_id().to_string());
            let record = self
                .visit(&mut walker, &workdir, commit)
                .inspect_err(|_| self.progress.abandon())?;
            report.push(record);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        info!(records = report.len(), "History walk finished");
        Ok(report)
    }

    fn visit<V: Vcs + ?Sized>(
        &self,
        walker: &mut HistoryWalker<'_, V>,
        workdir: &Path,
        commit: &CommitRef,
    ) -> Result<CommitRecord, PipelineError> {
        walker.checkout(commit).map_err(|source| {
            error!(commit = %commit.id, "Failed to checkout: {}", source);
            PipelineError::Checkout {
                commit: commit.id.clone(),
                source,
            }
        })?;

        let errors = self.lint(workdir, commit)?;

        let changes = walker.changes(commit).map_err(|source| {
            error!(commit = %commit.id, "Failed to get commit information: {}", source);
            PipelineError::Classify {
                commit: commit.id.clone(),
                source,
            }
        })?;

        debug!(
            commit = %commit.short_id(),
            added = changes.added.len(),
            deleted = changes.deleted.len(),
            modified = changes.modified.len(),
            errors,
            "Record appended"
        );
        Ok(CommitRecord::new(commit.id.clone(), changes, errors))
    }

    /// Sum of error counts over every linter for the checked-out commit
    fn lint(&self, workdir: &Path, commit: &CommitRef) -> Result<u64, PipelineError> {
        let mut total: u64 = 0;

        for linter in &self.linters {
            let result = linter.run(workdir);
            let outcome = linter.parse_output(&result).map_err(|source| {
                error!(
                    linter = linter.name(),
                    output = %String::from_utf8_lossy(&result.output),
                    "Failed to parse output"
                );
                PipelineError::Lint {
                    commit: commit.id.clone(),
                    linter: linter.name().to_string(),
                    source,
                }
            })?;

            match outcome {
                LintOutcome::NoMatchingFiles => {
                    debug!(linter = linter.name(), "No matching files");
                }
                LintOutcome::Normal(count) => {
                    debug!(linter = linter.name(), count, "Lint errors");
                }
            }
            total = total.saturating_add(outcome.count());
        }

        Ok(total)
    }
}
