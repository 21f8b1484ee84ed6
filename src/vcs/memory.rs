//! In-memory [`VersionControl`] for tests and dry runs.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::{VcsError, VersionControl};
use crate::models::{RenamedPath, RepoStatus};

/// A scripted repository: fixed status, summary and per-file diffs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVcs {
    repository: bool,
    status: RepoStatus,
    summary: Vec<String>,
    diffs: HashMap<String, String>,
    failure: Option<String>,
}

impl InMemoryVcs {
    /// An empty repository with no changes.
    pub fn repository() -> Self {
        Self {
            repository: true,
            ..Self::default()
        }
    }

    /// A directory that is not under version control.
    pub fn not_repository() -> Self {
        Self::default()
    }

    /// Make every query after the repository check fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn created(mut self, path: &str, diff: &str) -> Self {
        self.status.created.push(path.to_string());
        self.track(path, diff)
    }

    pub fn modified(mut self, path: &str, diff: &str) -> Self {
        self.status.modified.push(path.to_string());
        self.track(path, diff)
    }

    pub fn deleted(mut self, path: &str, diff: &str) -> Self {
        self.status.deleted.push(path.to_string());
        self.track(path, diff)
    }

    pub fn renamed(mut self, from: &str, to: &str) -> Self {
        self.status.renamed.push(RenamedPath {
            from: from.to_string(),
            to: to.to_string(),
        });
        self.track(to, "")
    }

    /// Untracked files show up in status but not in the diff summary.
    pub fn untracked(mut self, path: &str) -> Self {
        self.status.not_added.push(path.to_string());
        self
    }

    fn track(mut self, path: &str, diff: &str) -> Self {
        self.summary.push(path.to_string());
        self.diffs.insert(path.to_string(), diff.to_string());
        self
    }

    fn check(&self) -> Result<(), VcsError> {
        match &self.failure {
            Some(message) => Err(VcsError::Command(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VersionControl for InMemoryVcs {
    async fn is_repository(&self, _root: &Path) -> Result<bool, VcsError> {
        Ok(self.repository)
    }

    async fn status(&self, _root: &Path) -> Result<RepoStatus, VcsError> {
        self.check()?;
        Ok(self.status.clone())
    }

    async fn diff_summary(&self, _root: &Path) -> Result<Vec<String>, VcsError> {
        self.check()?;
        Ok(self.summary.clone())
    }

    async fn diff_file(&self, _root: &Path, path: &str) -> Result<String, VcsError> {
        self.check()?;
        Ok(self.diffs.get(path).cloned().unwrap_or_default())
    }
}
