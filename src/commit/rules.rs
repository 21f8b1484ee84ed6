//! Ordered decision tables for commit type and subject derivation.
//!
//! Each table is evaluated top to bottom and the first matching rule wins.

use crate::classify::{self, is_config_file, is_doc_file, is_test_file};
use crate::constants::MAX_BODY_FILES;
use crate::models::{CommitType, RepoStatus};

/// The non-excluded changes a message is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Changed files in diff-summary order.
    pub files: Vec<String>,
    pub created: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    /// Rename destinations.
    pub renamed: Vec<String>,
}

impl ChangeSet {
    /// Build a change set from a status snapshot and diff summary, dropping
    /// excluded paths everywhere.
    pub fn new(status: RepoStatus, summary: Vec<String>) -> Self {
        fn keep(paths: Vec<String>) -> Vec<String> {
            paths.into_iter().filter(|p| !classify::is_excluded(p)).collect()
        }

        Self {
            files: keep(summary),
            created: keep(status.created),
            modified: keep(status.modified),
            deleted: keep(status.deleted),
            renamed: keep(status.renamed.into_iter().map(|r| r.to).collect()),
        }
    }

    fn all_files(&self, predicate: fn(&str) -> bool) -> bool {
        !self.files.is_empty() && self.files.iter().all(|f| predicate(f))
    }
}

/// One row of the commit type table.
pub struct TypeRule {
    pub name: &'static str,
    pub applies: fn(&ChangeSet) -> bool,
    pub outcome: CommitType,
}

/// Commit type inference, highest priority first.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "all documentation",
        applies: |c| c.all_files(is_doc_file),
        outcome: CommitType::Docs,
    },
    TypeRule {
        name: "all tests",
        applies: |c| c.all_files(is_test_file),
        outcome: CommitType::Test,
    },
    TypeRule {
        name: "all configuration",
        applies: |c| c.all_files(is_config_file),
        outcome: CommitType::Chore,
    },
    TypeRule {
        name: "files created",
        applies: |c| !c.created.is_empty(),
        outcome: CommitType::Feat,
    },
    TypeRule {
        name: "files deleted",
        applies: |c| !c.deleted.is_empty(),
        outcome: CommitType::Chore,
    },
];

/// Type used when no rule in [`TYPE_RULES`] matches.
pub const DEFAULT_TYPE: CommitType = CommitType::Refactor;

/// Infer the commit type from a change set.
pub fn infer_type(changes: &ChangeSet) -> CommitType {
    TYPE_RULES
        .iter()
        .find(|rule| (rule.applies)(changes))
        .map_or(DEFAULT_TYPE, |rule| {
            tracing::debug!(rule = rule.name, "commit type rule matched");
            rule.outcome
        })
}

/// Verb table for a single-file subject, highest priority first.
const VERB_RULES: &[(fn(&ChangeSet, &str) -> bool, &str)] = &[
    (|c, f| c.created.iter().any(|p| p == f), "add"),
    (|c, f| c.deleted.iter().any(|p| p == f), "remove"),
    (|c, f| c.modified.iter().any(|p| p == f), "update"),
];

/// Verb used when a file appears in no status list (e.g. a pure rename).
const DEFAULT_VERB: &str = "update";

/// Derive the subject line for a change set.
pub fn derive_subject(changes: &ChangeSet, scope: Option<&str>) -> String {
    match changes.files.as_slice() {
        [] => "update project files".to_string(),
        [file] => {
            let verb = VERB_RULES
                .iter()
                .find(|(matches, _)| matches(changes, file))
                .map_or(DEFAULT_VERB, |(_, verb)| *verb);
            format!("{verb} {}", classify::base_name(&classify::normalize(file)))
        }
        files => match scope {
            Some(scope) => format!("update {scope} files"),
            None => format!("update {} files", files.len()),
        },
    }
}

/// Cut `subject` to at most `max` characters, ending in `…` when shortened.
///
/// Trailing whitespace left by the cut is dropped before the ellipsis.
pub fn truncate_subject(subject: &str, max: usize) -> String {
    if subject.chars().count() <= max {
        return subject.to_string();
    }
    let kept: String = subject.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// `type(scope): subject`, omitting the parenthesised scope when absent.
pub fn format_header(commit_type: CommitType, scope: Option<&str>, subject: &str) -> String {
    match scope {
        Some(scope) => format!("{commit_type}({scope}): {subject}"),
        None => format!("{commit_type}: {subject}"),
    }
}

/// One `- kind: path` bullet per file, capped at [`MAX_BODY_FILES`].
pub fn build_body(files: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = files
        .iter()
        .take(MAX_BODY_FILES)
        .map(|f| format!("- {}: {f}", classify::classify(f)))
        .collect();

    if files.len() > MAX_BODY_FILES {
        lines.push(format!(
            "- …and {} more file(s)",
            files.len() - MAX_BODY_FILES
        ));
    }

    lines
}
