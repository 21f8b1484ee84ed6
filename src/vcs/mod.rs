//! Version-control collaborator.
//!
//! The core only ever talks to git through the [`VersionControl`] trait so
//! commit synthesis and diff extraction can run against in-memory fakes.
//! [`git::GitCli`] is the production implementation and
//! [`memory::InMemoryVcs`] a scripted one for tests.

pub mod git;
pub mod memory;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RepoStatus;

pub use git::GitCli;
pub use memory::InMemoryVcs;

/// Errors from the version-control collaborator.
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("git command failed: {0}")]
    Command(String),
}

/// Read-only view of a repository's working tree changes.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether `root` is inside a repository work tree.
    async fn is_repository(&self, root: &Path) -> Result<bool, VcsError>;

    /// Created/modified/deleted/renamed paths of the working tree.
    async fn status(&self, root: &Path) -> Result<RepoStatus, VcsError>;

    /// Changed file paths relative to the repository top level, in the
    /// order the backend reports them.
    async fn diff_summary(&self, root: &Path) -> Result<Vec<String>, VcsError>;

    /// Unified diff of a single summary path with zero context lines.
    async fn diff_file(&self, root: &Path, path: &str) -> Result<String, VcsError>;
}

/// Fail with [`VcsError::NotARepository`] unless `root` is a repository.
pub async fn ensure_repository(vcs: &dyn VersionControl, root: &Path) -> Result<(), VcsError> {
    if vcs.is_repository(root).await? {
        Ok(())
    } else {
        Err(VcsError::NotARepository(root.to_path_buf()))
    }
}
