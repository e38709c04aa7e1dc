//! git-stories - replay a repository's history through static analysis
//!
//! Walks the commits of a repository oldest first, checks each one out,
//! runs the configured linters against it and classifies which files were
//! added, deleted or modified. The result is an ordered per-commit time
//! series for a downstream visualization tool.
//!
//! # Example
//!
//! ```no_run
//! use git_stories::lint::LinterRegistry;
//! use git_stories::models::LinterSpec;
//! use git_stories::pipeline::Pipeline;
//! use git_stories::vcs::GitRepository;
//! use std::path::Path;
//!
//! let linters = LinterRegistry::with_builtins()
//!     .resolve(&[LinterSpec::new("cpplint", vec![])])
//!     .unwrap();
//! let mut repo = GitRepository::open(Path::new("/path/to/repo")).unwrap();
//! let report = Pipeline::new(linters).unwrap().run(&mut repo).unwrap();
//! println!("{} commits", report.len());
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod lint;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod vcs;
pub mod workspace;

pub use error::{LintError, PipelineError, VcsError};
pub use models::{ChangeSet, CommitRecord, CommitRef, LinterSpec, PipelineReport};
