//! Version-control snapshot types.

use serde::Serialize;

/// A rename recorded in the working tree status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedPath {
    pub from: String,
    pub to: String,
}

/// Working tree status grouped the way the commit synthesizer consumes it.
///
/// Paths are repository-relative with forward slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Files added to the index.
    pub created: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<RenamedPath>,
    /// Untracked files.
    pub not_added: Vec<String>,
}

/// A changed file paired with its zero-context unified diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub file: String,
    pub diff: String,
}
