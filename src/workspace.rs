//! Scratch working directory
//!
//! The single directory the repository is cloned into and checked out over
//! and over. It exists only for the duration of one run.
//!
//! A directory is only ever replaced or removed if it carries the
//! [`MARKER_FILE`] written when it was created, so pointing the workdir at an
//! existing project or home directory fails instead of wiping it.

use crate::error::PipelineError;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default scratch directory name, relative to the current directory
pub const DEFAULT_WORKDIR: &str = "Temp";

/// Written into every scratch directory this tool creates
pub const MARKER_FILE: &str = ".git-stories-workdir";

#[derive(Debug, Clone)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Resolve `path` against the current directory without touching disk.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| PipelineError::Workspace {
                    path: path.to_path_buf(),
                    source,
                })?
                .join(path)
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, source: Error) -> PipelineError {
        PipelineError::Workspace {
            path: self.path.clone(),
            source,
        }
    }

    /// Create the directory.
    ///
    /// A previous scratch directory is removed and recreated. An existing
    /// empty directory is adopted. Anything else, and the current directory
    /// or one of its ancestors, is refused.
    pub fn create(&self) -> Result<(), PipelineError> {
        let cwd = std::env::current_dir().map_err(|e| self.error(e))?;
        if cwd.starts_with(&self.path) {
            return Err(self.error(Error::new(
                ErrorKind::InvalidInput,
                "refusing to use the current directory or one of its parents",
            )));
        }

        if self.is_owned() {
            warn!(path = %self.path.display(), "Path already exists, removing and recreating it");
            std::fs::remove_dir_all(&self.path).map_err(|e| self.error(e))?;
        } else if self.exists() && !self.is_empty_dir() {
            return Err(self.error(Error::new(
                ErrorKind::AlreadyExists,
                "path exists and was not created by git-stories",
            )));
        }

        std::fs::create_dir_all(&self.path).map_err(|e| self.error(e))?;
        std::fs::write(self.path.join(MARKER_FILE), b"").map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), "Created scratch directory");
        Ok(())
    }

    /// Whether the directory is still on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Whether the directory was created by [`create`](Self::create)
    pub fn is_owned(&self) -> bool {
        self.path.join(MARKER_FILE).is_file()
    }

    fn is_empty_dir(&self) -> bool {
        std::fs::read_dir(&self.path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }

    /// Remove the directory and everything in it.
    ///
    /// Fails for directories without the marker file.
    pub fn remove(&self) -> Result<(), PipelineError> {
        if self.exists() && !self.is_owned() {
            return Err(self.error(Error::new(
                ErrorKind::PermissionDenied,
                "not a git-stories scratch directory, leaving it in place",
            )));
        }
        std::fs::remove_dir_all(&self.path).map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), "Removed scratch directory");
        Ok(())
    }

    /// Best-effort removal. Safe to call unconditionally: a missing or
    /// foreign directory is left alone and failures are only logged.
    pub fn cleanup(&self) {
        if !self.is_owned() {
            return;
        }
        if let Err(e) = self.remove() {
            warn!("Failed to remove folder: {}", e);
        }
    }
}
