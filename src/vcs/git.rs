//! Git CLI backend.
//!
//! Shells out to `git` via `tokio::process::Command`. Paths are read with
//! `-z` so quoting and unusual file names never need unescaping.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{VcsError, VersionControl};
use crate::models::{RenamedPath, RepoStatus};

/// [`VersionControl`] implementation backed by the `git` executable.
///
/// Summary paths are relative to the repository top level, so per-file
/// diffs run there too. The top level and diff base are resolved once per
/// [`VersionControl::diff_summary`] call and reused by
/// [`VersionControl::diff_file`].
#[derive(Debug, Default)]
pub struct GitCli {
    targets: Mutex<HashMap<PathBuf, DiffTarget>>,
}

/// Where and against what per-file diffs run for a given root.
#[derive(Debug, Clone, PartialEq)]
struct DiffTarget {
    toplevel: PathBuf,
    base: &'static str,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git with `args` in `root` and return stdout.
    async fn run(&self, root: &Path, args: &[&str]) -> Result<String, VcsError> {
        debug!(root = %root.display(), ?args, "running git");
        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(root)
            .output()
            .await
            .map_err(|e| VcsError::Command(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::Command(format!(
                "git {} failed ({}): {}",
                args.first().copied().unwrap_or_default(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| VcsError::Command(format!("git output is not valid UTF-8: {e}")))
    }

    /// Whether `HEAD` resolves, i.e. the repository has at least one commit.
    async fn has_head(&self, root: &Path) -> Result<bool, VcsError> {
        let output = tokio::process::Command::new("git")
            .args(["rev-parse", "--verify", "--quiet", "HEAD"])
            .current_dir(root)
            .output()
            .await
            .map_err(|e| VcsError::Command(format!("failed to run git: {e}")))?;
        Ok(output.status.success())
    }

    /// Resolve the repository top level and the revision to diff against.
    ///
    /// Before the first commit there is no `HEAD`, so staged changes are
    /// compared against the empty tree via `--cached`.
    async fn resolve_target(&self, root: &Path) -> Result<DiffTarget, VcsError> {
        let toplevel = self.run(root, &["rev-parse", "--show-toplevel"]).await?;
        let base = if self.has_head(root).await? {
            "HEAD"
        } else {
            "--cached"
        };
        Ok(DiffTarget {
            toplevel: PathBuf::from(toplevel.trim()),
            base,
        })
    }

    fn cached_target(&self, root: &Path) -> Option<DiffTarget> {
        self.targets
            .lock()
            .ok()
            .and_then(|targets| targets.get(root).cloned())
    }

    fn remember_target(&self, root: &Path, target: DiffTarget) {
        if let Ok(mut targets) = self.targets.lock() {
            targets.insert(root.to_path_buf(), target);
        }
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn is_repository(&self, root: &Path) -> Result<bool, VcsError> {
        let is_dir = tokio::fs::metadata(root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Ok(false);
        }
        let output = tokio::process::Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(root)
            .output()
            .await
            .map_err(|e| VcsError::Command(format!("failed to run git: {e}")))?;

        Ok(output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    async fn status(&self, root: &Path) -> Result<RepoStatus, VcsError> {
        let raw = self
            .run(root, &["status", "--porcelain=v1", "-z", "--untracked-files=all"])
            .await?;
        Ok(parse_porcelain_status(&raw))
    }

    async fn diff_summary(&self, root: &Path) -> Result<Vec<String>, VcsError> {
        let target = self.resolve_target(root).await?;
        let raw = self
            .run(&target.toplevel, &["diff", "--name-only", "-z", target.base])
            .await?;
        self.remember_target(root, target);
        Ok(raw
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn diff_file(&self, root: &Path, path: &str) -> Result<String, VcsError> {
        let target = match self.cached_target(root) {
            Some(target) => target,
            None => self.resolve_target(root).await?,
        };
        self.run(
            &target.toplevel,
            &["diff", "--unified=0", target.base, "--", path],
        )
        .await
    }
}

/// Parse `git status --porcelain=v1 -z` output.
///
/// Each record is `XY <path>`; rename and copy records are followed by an
/// extra NUL-terminated field holding the original path. `X` is the index
/// column and `Y` the work tree column.
pub fn parse_porcelain_status(raw: &str) -> RepoStatus {
    let mut status = RepoStatus::default();
    let mut records = raw.split('\0').filter(|r| !r.is_empty());

    while let Some(record) = records.next() {
        let mut chars = record.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            continue;
        };
        let Some(path) = record.get(3..).filter(|p| !p.is_empty()) else {
            continue;
        };
        let path = path.to_string();

        match (x, y) {
            ('?', '?') => status.not_added.push(path),
            ('!', '!') => {}
            ('R', _) | ('C', _) => {
                let from = records.next().unwrap_or_default().to_string();
                if x == 'R' {
                    status.renamed.push(RenamedPath {
                        from,
                        to: path.clone(),
                    });
                } else {
                    status.created.push(path.clone());
                }
                if y == 'M' {
                    status.modified.push(path);
                }
            }
            ('A', _) => status.created.push(path),
            ('D', _) | (_, 'D') => status.deleted.push(path),
            ('M' | 'T' | 'U', _) | (_, 'M' | 'T' | 'U') => status.modified.push(path),
            _ => {}
        }
    }

    status
}
