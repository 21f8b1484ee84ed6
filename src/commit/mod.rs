//! Conventional Commit message synthesis.
//!
//! Reads the working tree status and diff summary from a
//! [`VersionControl`] collaborator and turns them into a
//! `type(scope): subject` header plus an optional per-file body. The
//! decision tables live in [`rules`].

pub mod rules;

use thiserror::Error;
use tracing::debug;

use crate::classify::top_level_scope;
use crate::models::{CommitMessageRequest, CommitMessageResult};
use crate::vcs::{self, VcsError, VersionControl};

pub use rules::{ChangeSet, infer_type};

/// Errors from commit message synthesis.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("invalid commit message request: {0}")]
    InvalidRequest(String),

    #[error("failed to generate commit message: {0}")]
    Vcs(#[from] VcsError),
}

/// Synthesize a commit message for the changes under `request.root`.
///
/// Explicit type, scope and subject on the request win over inference.
/// Nothing is returned unless every git query succeeds.
pub async fn generate_commit_message(
    vcs: &dyn VersionControl,
    request: &CommitMessageRequest,
) -> Result<CommitMessageResult, CommitError> {
    request.validate().map_err(CommitError::InvalidRequest)?;

    let root = request.root.as_path();
    vcs::ensure_repository(vcs, root).await?;
    let status = vcs.status(root).await?;
    let summary = vcs.diff_summary(root).await?;

    let changes = ChangeSet::new(status, summary);
    Ok(synthesize(&changes, request))
}

/// Build the message from an already gathered change set.
pub fn synthesize(changes: &ChangeSet, request: &CommitMessageRequest) -> CommitMessageResult {
    let commit_type = request
        .commit_type
        .unwrap_or_else(|| infer_type(changes));

    let scope = non_blank(request.scope.as_deref())
        .map(str::to_string)
        .or_else(|| top_level_scope(changes.files.as_slice()));

    let subject = match non_blank(request.subject.as_deref()) {
        Some(subject) => subject.to_string(),
        None => rules::derive_subject(changes, scope.as_deref()),
    };
    let subject = rules::truncate_subject(&subject, request.max_subject_length);

    let header = rules::format_header(commit_type, scope.as_deref(), &subject);
    let body = if request.include_body {
        rules::build_body(&changes.files)
    } else {
        Vec::new()
    };

    debug!(
        %commit_type,
        scope = scope.as_deref().unwrap_or(""),
        files = changes.files.len(),
        "synthesized commit message"
    );

    CommitMessageResult {
        commit_type,
        scope,
        subject,
        header,
        body,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
