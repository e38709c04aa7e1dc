//! End-to-end run
//!
//! Resolves linters, prepares the scratch directory, clones the repository,
//! walks its history and writes the report. The report file is only written
//! once the whole walk succeeded.

use crate::config::Config;
use crate::error::PipelineError;
use crate::lint::LinterRegistry;
use crate::models::PipelineReport;
use crate::pipeline::Pipeline;
use crate::report::{write_report, ReportFormat};
use crate::vcs::GitRepository;
use crate::workspace::ScratchDir;
use anyhow::Result;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{error, info};

/// Summary of a finished run
#[derive(Debug)]
pub struct RunSummary {
    pub report: PipelineReport,
    pub output_path: PathBuf,
    pub format: ReportFormat,
}

/// Drives one run from a loaded configuration
pub struct Worker {
    config: Config,
    scratch: ScratchDir,
    registry: LinterRegistry,
    keep_workdir: bool,
    progress: ProgressBar,
}

impl Worker {
    pub fn new(config: Config) -> Result<Self> {
        let scratch = ScratchDir::new(&config.workdir)?;
        Ok(Self {
            config,
            scratch,
            registry: LinterRegistry::with_builtins(),
            keep_workdir: false,
            progress: ProgressBar::hidden(),
        })
    }

    /// Use a different linter table (e.g. fakes in tests).
    pub fn with_registry(mut self, registry: LinterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Leave the scratch directory on disk after a successful run.
    pub fn keep_workdir(mut self, keep: bool) -> Self {
        self.keep_workdir = keep;
        self
    }

    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Run the whole pipeline.
    ///
    /// On failure the caller should call [`Worker::error_cleanup`].
    pub fn work(&self) -> Result<RunSummary> {
        let linters = self.registry.resolve(&self.config.linters).map_err(|e| {
            error!("Failed to get linters: {}", e);
            e
        })?;
        let pipeline = Pipeline::new(linters)?.with_progress(self.progress.clone());
        info!(linters = ?pipeline.linter_names(), "Linters resolved");

        self.scratch.create()?;

        let remote = self.config.remote();
        let destination = self.scratch.path().join(self.config.clone_dir_name());
        let mut repo = GitRepository::new();
        repo.clone_from(&remote, &destination)
            .map_err(PipelineError::Clone)?;

        let report = pipeline.run(&mut repo)?;

        let output = &self.config.output;
        write_report(&report, output.format, &output.path)?;

        if !self.keep_workdir {
            self.scratch.cleanup();
        }

        Ok(RunSummary {
            report,
            output_path: output.path.clone(),
            format: output.format,
        })
    }

    /// Remove the scratch directory if a failed run left it behind.
    pub fn error_cleanup(&self) {
        self.scratch.cleanup();
    }
}
