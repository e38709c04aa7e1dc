//! History walker
//!
//! Owns the repository handle for the duration of a walk. Checkout takes
//! `&mut self`, so only one checkout can ever be in flight against the
//! working tree, and the walker is the only thing that mutates it.

use crate::classify::classify;
use crate::error::VcsError;
use crate::models::{ChangeSet, CommitRef};
use crate::vcs::Vcs;
use std::path::Path;
use tracing::debug;

pub struct HistoryWalker<'a, V: Vcs + ?Sized> {
    vcs: &'a mut V,
}

impl<'a, V: Vcs + ?Sized> HistoryWalker<'a, V> {
    pub fn new(vcs: &'a mut V) -> Self {
        Self { vcs }
    }

    /// All commits, newest first, fully materialized
    pub fn enumerate_commits(&self) -> Result<Vec<CommitRef>, VcsError> {
        self.vcs.enumerate_commits()
    }

    /// All commits, oldest first
    pub fn commits_oldest_first(&self) -> Result<Vec<CommitRef>, VcsError> {
        let mut commits = self.enumerate_commits()?;
        commits.reverse();
        Ok(commits)
    }

    /// Point the working tree at `commit`. Blocks until done.
    pub fn checkout(&mut self, commit: &CommitRef) -> Result<(), VcsError> {
        debug!(commit = %commit.short_id(), "Checking out");
        self.vcs.checkout(commit)
    }

    /// Changes `commit` introduced relative to its first parent
    pub fn changes(&self, commit: &CommitRef) -> Result<ChangeSet, VcsError> {
        classify(&*self.vcs, commit)
    }

    /// Directory linters should run in
    pub fn workdir(&self) -> Result<&Path, VcsError> {
        self.vcs.workdir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileChange;

    struct Linear {
        ids: Vec<&'static str>,
        checked_out: Vec<String>,
    }

    impl Vcs for Linear {
        fn enumerate_commits(&self) -> Result<Vec<CommitRef>, VcsError> {
            Ok(self
                .ids
                .iter()
                .rev()
                .enumerate()
                .map(|(i, id)| {
                    let parents = if i + 1 < self.ids.len() {
                        vec![self.ids[self.ids.len() - i - 2].to_string()]
                    } else {
                        vec![]
                    };
                    CommitRef::new(*id, parents)
                })
                .collect())
        }

        fn checkout(&mut self, commit: &CommitRef) -> Result<(), VcsError> {
            self.checked_out.push(commit.id.clone());
            Ok(())
        }

        fn diff(&self, _parent: &str, _commit: &CommitRef) -> Result<Vec<FileChange>, VcsError> {
            Ok(vec![FileChange::modified("a")])
        }

        fn tree_files(&self, _commit: &CommitRef) -> Result<Vec<String>, VcsError> {
            Ok(vec!["a".into()])
        }

        fn workdir(&self) -> Result<&Path, VcsError> {
            Ok(Path::new("/tmp/work"))
        }
    }

    #[test]
    fn test_oldest_first() {
        let mut vcs = Linear {
            ids: vec!["c1", "c2", "c3"],
            checked_out: Vec::new(),
        };
        let walker = HistoryWalker::new(&mut vcs);

        let newest_first: Vec<String> = walker
            .enumerate_commits()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(newest_first, vec!["c3", "c2", "c1"]);

        let oldest = walker.commits_oldest_first().unwrap();
        assert_eq!(oldest[0].id, "c1");
        assert!(oldest[0].is_root());
        assert_eq!(oldest[2].parents, vec!["c2".to_string()]);
    }

    #[test]
    fn test_checkout_and_changes() {
        let mut vcs = Linear {
            ids: vec!["c1", "c2"],
            checked_out: Vec::new(),
        };
        {
            let mut walker = HistoryWalker::new(&mut vcs);
            let commits = walker.commits_oldest_first().unwrap();
            for commit in &commits {
                walker.checkout(commit).unwrap();
            }
            assert!(walker.changes(&commits[0]).unwrap().modified.is_empty());
            assert!(walker.changes(&commits[1]).unwrap().modified.contains("a"));
            assert_eq!(walker.workdir().unwrap(), Path::new("/tmp/work"));
        }
        assert_eq!(vcs.checked_out, vec!["c1", "c2"]);
    }
}
