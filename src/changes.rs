//! Per-file diff extraction for a repository.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::classify;
use crate::models::DiffEntry;
use crate::vcs::{self, VcsError, VersionControl};

/// Errors from diff extraction.
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("failed to collect file changes: {0}")]
    Vcs(#[from] VcsError),
}

/// Collect a zero-context diff for every non-excluded changed file under
/// `root`, in the order the diff summary lists them.
pub async fn get_file_changes_in_directory(
    vcs: &dyn VersionControl,
    root: &Path,
) -> Result<Vec<DiffEntry>, ChangesError> {
    vcs::ensure_repository(vcs, root).await?;

    let summary = vcs.diff_summary(root).await?;
    let mut entries = Vec::with_capacity(summary.len());

    for file in summary {
        if classify::is_excluded(&file) {
            debug!(%file, "skipping excluded path");
            continue;
        }
        let diff = vcs.diff_file(root, &file).await?;
        entries.push(DiffEntry { file, diff });
    }

    Ok(entries)
}
