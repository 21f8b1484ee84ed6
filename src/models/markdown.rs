//! Markdown document request/result types.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One `## heading` block of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MarkdownSection {
    pub heading: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Input to the Markdown file writer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkdownDocumentRequest {
    /// Directory every write must stay inside.
    pub root: PathBuf,
    /// Target path, relative to `root`.
    pub relative_path: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub sections: Vec<MarkdownSection>,
    /// Front matter keys in insertion order.
    pub front_matter: Option<IndexMap<String, serde_json::Value>>,
    /// Replace an existing file instead of failing.
    pub overwrite: bool,
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownWriteResult {
    /// Absolute resolved path of the written file.
    pub path: PathBuf,
    /// Size of the document in UTF-8 bytes.
    pub bytes_written: usize,
    /// The file did not exist before.
    pub created: bool,
    /// An existing file was replaced.
    pub overwritten: bool,
}
