//! libgit2-backed repository access
//!
//! Clones the target repository, enumerates its history and checks commits
//! out in place using the git2 crate (Rust bindings to libgit2).

use crate::error::VcsError;
use crate::models::{CommitRef, FileChange};
use crate::vcs::Vcs;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{
    Cred, Delta, DiffFindOptions, ErrorCode, FetchOptions, FileMode, ObjectType, Oid, RemoteCallbacks,
    Repository, Sort, Tree,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where to clone from and how to authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub url: String,
    /// Basic-auth username and token
    pub credentials: Option<(String, String)>,
}

impl Remote {
    /// A public GitHub repository
    pub fn github(owner: &str, repository: &str) -> Self {
        Self {
            url: format!("https://github.com/{}/{}.git", owner, repository),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), token.into()));
        self
    }
}

/// A repository the walker can check out commit by commit
///
/// Starts detached from any path; every operation fails with
/// [`VcsError::RepositoryNotCloned`] until [`clone_from`](Self::clone_from)
/// or [`open`](Self::open) succeeds.
#[derive(Default)]
pub struct GitRepository {
    repo: Option<Repository>,
}

impl GitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an existing non-bare repository.
    pub fn open(path: &Path) -> Result<Self, VcsError> {
        let repo = Repository::open(path)?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo: Some(repo) })
    }

    /// Clone `remote` into `destination` and keep it as the working repository.
    pub fn clone_from(&mut self, remote: &Remote, destination: &Path) -> Result<PathBuf, VcsError> {
        info!(url = %remote.url, destination = %destination.display(), "Cloning repository");

        let mut callbacks = RemoteCallbacks::new();
        if let Some((username, token)) = &remote.credentials {
            callbacks.credentials(move |_url, _username, _allowed| {
                Cred::userpass_plaintext(username, token)
            });
        }
        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(callbacks);

        let repo = RepoBuilder::new()
            .fetch_options(fetch)
            .clone(&remote.url, destination)
            .map_err(|e| VcsError::CloneFailed {
                url: remote.url.clone(),
                message: e.message().to_string(),
            })?;

        let path = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| destination.to_path_buf());
        self.repo = Some(repo);
        Ok(path)
    }

    pub fn is_cloned(&self) -> bool {
        self.repo.is_some()
    }

    fn repo(&self) -> Result<&Repository, VcsError> {
        self.repo.as_ref().ok_or(VcsError::RepositoryNotCloned)
    }

    fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>, VcsError> {
        let repo = self.repo()?;
        let oid = Oid::from_str(id).map_err(|_| VcsError::UnknownCommit(id.to_string()))?;
        repo.find_commit(oid).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                VcsError::UnknownCommit(id.to_string())
            } else {
                VcsError::Git(e)
            }
        })
    }
}

impl Vcs for GitRepository {
    fn enumerate_commits(&self) -> Result<Vec<CommitRef>, VcsError> {
        let repo = self.repo()?;
        if repo.is_empty()? {
            debug!("Repository has no commits");
            return Ok(Vec::new());
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let commit = repo.find_commit(oid_result?)?;
            commits.push(CommitRef {
                id: commit.id().to_string(),
                parents: commit.parent_ids().map(|p| p.to_string()).collect(),
            });
        }

        debug!("Enumerated {} commits", commits.len());
        Ok(commits)
    }

    fn checkout(&mut self, commit: &CommitRef) -> Result<(), VcsError> {
        let checkout_failed = |e: git2::Error| VcsError::CheckoutFailed {
            commit: commit.id.clone(),
            message: e.message().to_string(),
        };

        let target = self.find_commit(&commit.id).map_err(|e| match e {
            VcsError::RepositoryNotCloned => e,
            other => VcsError::CheckoutFailed {
                commit: commit.id.clone(),
                message: other.to_string(),
            },
        })?;
        let repo = self.repo()?;

        let mut opts = CheckoutBuilder::new();
        opts.force().remove_untracked(true);
        repo.checkout_tree(target.as_object(), Some(&mut opts))
            .map_err(checkout_failed)?;
        repo.set_head_detached(target.id()).map_err(checkout_failed)?;

        debug!(commit = %commit.short_id(), "Checked out");
        Ok(())
    }

    fn diff(&self, parent: &str, commit: &CommitRef) -> Result<Vec<FileChange>, VcsError> {
        let repo = self.repo()?;
        let old_tree = self.find_commit(parent)?.tree()?;
        let new_tree = self.find_commit(&commit.id)?.tree()?;

        let mut diff = repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        // Submodules are gitlinks, not files: the root tree walk skips them too.
        let path_of = |file: git2::DiffFile<'_>| {
            if file.mode() == FileMode::Commit {
                return None;
            }
            file.path_bytes()
                .map(|p| String::from_utf8_lossy(p).into_owned())
        };

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let (from, to) = match delta.status() {
                Delta::Added | Delta::Copied => (None, path_of(delta.new_file())),
                Delta::Deleted => (path_of(delta.old_file()), None),
                Delta::Modified | Delta::Renamed | Delta::Typechange => {
                    (path_of(delta.old_file()), path_of(delta.new_file()))
                }
                _ => continue,
            };
            if from.is_none() && to.is_none() {
                continue;
            }
            changes.push(FileChange {
                from,
                to,
                changed: delta.old_file().id() != delta.new_file().id(),
            });
        }

        Ok(changes)
    }

    fn tree_files(&self, commit: &CommitRef) -> Result<Vec<String>, VcsError> {
        let repo = self.repo()?;
        let tree = self.find_commit(&commit.id)?.tree()?;

        let mut files = Vec::new();
        collect_blobs(repo, &tree, &mut Vec::new(), &mut files)?;
        Ok(files)
    }

    fn workdir(&self) -> Result<&Path, VcsError> {
        self.repo()?
            .workdir()
            .ok_or(VcsError::RepositoryNotCloned)
    }
}

/// Recursively list blob paths under `tree`.
///
/// Names are joined as raw bytes and decoded lossily once, the same way
/// [`Vcs::diff`] decodes its paths.
fn collect_blobs(
    repo: &Repository,
    tree: &Tree<'_>,
    prefix: &mut Vec<u8>,
    files: &mut Vec<String>,
) -> Result<(), git2::Error> {
    for entry in tree.iter() {
        let len = prefix.len();
        prefix.extend_from_slice(entry.name_bytes());
        match entry.kind() {
            Some(ObjectType::Blob) => files.push(String::from_utf8_lossy(prefix).into_owned()),
            Some(ObjectType::Tree) => {
                prefix.push(b'/');
                let subtree = repo.find_tree(entry.id())?;
                collect_blobs(repo, &subtree, prefix, files)?;
            }
            _ => {}
        }
        prefix.truncate(len);
    }
    Ok(())
}
