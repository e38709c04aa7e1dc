//! Core data models for git-stories
//!
//! Commits as seen by the walker, the per-commit change classification and
//! the records that make up the final report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A commit as exposed by the VCS layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// Full commit hash
    pub id: String,
    /// Parent hashes, in the order the VCS stores them
    pub parents: Vec<String>,
}

impl CommitRef {
    pub fn new(id: impl Into<String>, parents: Vec<String>) -> Self {
        Self {
            id: id.into(),
            parents,
        }
    }

    /// A commit without parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// The diff baseline. Merge commits only use their first parent.
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Abbreviated hash for log output
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(12)]
    }
}

/// A linter as named in the run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Program to execute when `name` is not a built-in (defaults to `name`)
    #[serde(default)]
    pub command: Option<String>,
    /// Marker printed right before the error count
    #[serde(default)]
    pub result_template: Option<String>,
}

impl LinterSpec {
    pub fn new(name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
            command: None,
            result_template: None,
        }
    }
}

/// One file pair from a parent/child tree diff
///
/// `from` is absent for added files, `to` is absent for deleted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Whether the content differs between `from` and `to`
    pub changed: bool,
}

impl FileChange {
    pub fn added(path: impl Into<String>) -> Self {
        Self {
            from: None,
            to: Some(path.into()),
            changed: true,
        }
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self {
            from: Some(path.into()),
            to: None,
            changed: true,
        }
    }

    pub fn modified(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            from: Some(path.clone()),
            to: Some(path),
            changed: true,
        }
    }

    pub fn renamed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            changed: true,
        }
    }
}

/// File-level changes introduced by a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: BTreeSet<String>,
    pub deleted: BTreeSet<String>,
    pub modified: BTreeSet<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Total number of touched paths (a rename counts twice)
    pub fn len(&self) -> usize {
        self.added.len() + self.deleted.len() + self.modified.len()
    }
}

/// The per-commit unit of output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    #[serde(rename = "new_files")]
    pub added: Vec<String>,
    #[serde(rename = "deleted_files")]
    pub deleted: Vec<String>,
    #[serde(rename = "changed_files")]
    pub modified: Vec<String>,
    /// Sum of lint errors over every configured linter
    pub errors: u64,
}

impl CommitRecord {
    pub fn new(hash: impl Into<String>, changes: ChangeSet, errors: u64) -> Self {
        Self {
            hash: hash.into(),
            added: changes.added.into_iter().collect(),
            deleted: changes.deleted.into_iter().collect(),
            modified: changes.modified.into_iter().collect(),
            errors,
        }
    }
}

/// The whole walk, oldest commit first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub commits: Vec<CommitRecord>,
}

impl PipelineReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: CommitRecord) {
        self.commits.push(record);
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Error count of the newest commit
    pub fn latest_errors(&self) -> Option<u64> {
        self.commits.last().map(|c| c.errors)
    }
}
