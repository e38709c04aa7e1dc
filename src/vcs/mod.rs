//! Version-control access
//!
//! The walker, classifier and coordinator only see the [`Vcs`] trait.
//! [`GitRepository`] implements it on top of libgit2; tests plug in
//! in-memory fakes.

pub mod git;

pub use git::{GitRepository, Remote};

use crate::error::VcsError;
use crate::models::{CommitRef, FileChange};
use std::path::Path;

/// Operations the history walk needs from a repository
pub trait Vcs {
    /// All commits reachable from HEAD, newest first
    fn enumerate_commits(&self) -> Result<Vec<CommitRef>, VcsError>;

    /// Make the working tree match `commit`
    fn checkout(&mut self, commit: &CommitRef) -> Result<(), VcsError>;

    /// File pairs that differ between `parent` and `commit`
    fn diff(&self, parent: &str, commit: &CommitRef) -> Result<Vec<FileChange>, VcsError>;

    /// Every file path in the tree of `commit`
    fn tree_files(&self, commit: &CommitRef) -> Result<Vec<String>, VcsError>;

    /// Directory holding the checked-out files
    fn workdir(&self) -> Result<&Path, VcsError>;
}
