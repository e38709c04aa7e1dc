//! Change classification
//!
//! Turns a parent/child tree diff into added, deleted and modified path sets.
//! A root commit never goes through the diff: everything in its tree is new.

use crate::error::VcsError;
use crate::models::{ChangeSet, CommitRef, FileChange};
use crate::vcs::Vcs;
use tracing::debug;

impl ChangeSet {
    /// Classify the file pairs of a tree diff.
    ///
    /// A rename is recorded as an add of the new path plus a delete of the
    /// old one, never as a modification.
    pub fn from_changes<I>(changes: I) -> Self
    where
        I: IntoIterator<Item = FileChange>,
    {
        let mut set = ChangeSet::default();
        for change in changes {
            match (change.from, change.to) {
                (None, Some(to)) => {
                    set.added.insert(to);
                }
                (Some(from), None) => {
                    set.deleted.insert(from);
                }
                (Some(from), Some(to)) if from != to => {
                    set.added.insert(to);
                    set.deleted.insert(from);
                }
                (Some(path), Some(_)) => {
                    if change.changed {
                        set.modified.insert(path);
                    }
                }
                (None, None) => {}
            }
        }
        set
    }

    /// Every file of a root commit's tree counts as added.
    pub fn from_root_tree<I>(files: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        ChangeSet {
            added: files.into_iter().collect(),
            ..ChangeSet::default()
        }
    }
}

/// Classify `commit` against its first parent, or as a root commit.
///
/// VCS failures are returned as-is; no partial set is produced.
pub fn classify<V: Vcs + ?Sized>(vcs: &V, commit: &CommitRef) -> Result<ChangeSet, VcsError> {
    match commit.first_parent() {
        None => {
            debug!(commit = %commit.short_id(), "First commit");
            let files = vcs.tree_files(commit)?;
            Ok(ChangeSet::from_root_tree(files))
        }
        Some(parent) => {
            let changes = vcs.diff(parent, commit)?;
            Ok(ChangeSet::from_changes(changes))
        }
    }
}
