//! Commit message request/result types.

use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_MAX_SUBJECT_LENGTH, MAX_SUBJECT_LENGTH_CAP};

/// Conventional Commit type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

/// Input to the commit message synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessageRequest {
    /// Repository root the request is scoped to.
    pub root: PathBuf,
    /// Explicit type; skips inference when set.
    pub commit_type: Option<CommitType>,
    /// Explicit scope; skips derivation when set.
    pub scope: Option<String>,
    /// Explicit subject; skips derivation when set.
    pub subject: Option<String>,
    /// Whether to append the per-file bullet list.
    pub include_body: bool,
    /// Subject length limit in characters, `1..=MAX_SUBJECT_LENGTH_CAP`.
    pub max_subject_length: usize,
}

impl CommitMessageRequest {
    /// A request for `root` with no overrides and default limits.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            commit_type: None,
            scope: None,
            subject: None,
            include_body: true,
            max_subject_length: DEFAULT_MAX_SUBJECT_LENGTH,
        }
    }

    /// Check the subject length bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_subject_length == 0 || self.max_subject_length > MAX_SUBJECT_LENGTH_CAP {
            return Err(format!(
                "max_subject_length must be between 1 and {MAX_SUBJECT_LENGTH_CAP}, got {}",
                self.max_subject_length
            ));
        }
        Ok(())
    }
}

/// A synthesized Conventional Commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessageResult {
    #[serde(rename = "type")]
    pub commit_type: CommitType,
    pub scope: Option<String>,
    /// Subject after truncation.
    pub subject: String,
    /// `type(scope): subject`.
    pub header: String,
    /// Body lines; empty when the body was disabled.
    pub body: Vec<String>,
}

impl CommitMessageResult {
    /// Render the full message: header, then a blank line and the body.
    pub fn message(&self) -> String {
        if self.body.is_empty() {
            return self.header.clone();
        }
        let mut lines = Vec::with_capacity(self.body.len() + 2);
        lines.push(self.header.as_str());
        lines.push("");
        lines.extend(self.body.iter().map(String::as_str));
        lines.join("\n")
    }
}

impl fmt::Display for CommitMessageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
