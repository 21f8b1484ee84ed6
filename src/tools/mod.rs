//! Agentic tools exposed to the language model.
//!
//! Each tool implements rig-core's `Tool` trait: a name, a JSON schema for
//! its arguments (derived with `schemars`), and a `call` that validates the
//! arguments and runs the matching core operation. Errors travel back to
//! the model as tool errors instead of aborting the conversation.

pub mod commit_message;
pub mod file_changes;
pub mod markdown_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use colored::Colorize;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use schemars::JsonSchema;
use serde_json::json;

use crate::config::CommitConfig;
use crate::filesystem::{FileSystem, LocalFs};
use crate::path_guard;
use crate::vcs::{GitCli, VersionControl};

pub use commit_message::CommitMessageTool;
pub use file_changes::FileChangesTool;
pub use markdown_file::MarkdownFileTool;

/// Whether tool calls are echoed to stderr.
static TRACE_TOOL_CALLS: AtomicBool = AtomicBool::new(false);

/// Error returned to the model when a tool call fails.
#[derive(Debug, thiserror::Error)]
#[error("{tool} failed: {message}")]
pub struct ToolError {
    pub tool: &'static str,
    pub message: String,
}

impl ToolError {
    pub fn new(tool: &'static str, message: impl Into<String>) -> Self {
        Self {
            tool,
            message: message.into(),
        }
    }
}

/// Shared collaborators and defaults for building the tool set.
#[derive(Clone)]
pub struct Toolbox {
    pub vcs: Arc<dyn VersionControl>,
    pub fs: Arc<dyn FileSystem>,
    /// Directory used when the model does not name one.
    pub root: PathBuf,
    pub commit: CommitConfig,
}

impl Toolbox {
    /// Tools backed by the `git` CLI and the local filesystem.
    pub fn local(root: PathBuf, commit: CommitConfig) -> Self {
        Self {
            vcs: Arc::new(GitCli::new()),
            fs: Arc::new(LocalFs),
            root,
            commit,
        }
    }

    pub fn commit_message_tool(&self) -> CommitMessageTool {
        CommitMessageTool::new(Arc::clone(&self.vcs), self.root.clone(), self.commit.clone())
    }

    pub fn file_changes_tool(&self) -> FileChangesTool {
        FileChangesTool::new(Arc::clone(&self.vcs), self.root.clone())
    }

    pub fn markdown_file_tool(&self) -> MarkdownFileTool {
        MarkdownFileTool::new(Arc::clone(&self.fs), self.root.clone())
    }

    /// Definitions of every tool, in registration order.
    pub async fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            Tool::definition(&self.file_changes_tool(), String::new()).await,
            Tool::definition(&self.commit_message_tool(), String::new()).await,
            Tool::definition(&self.markdown_file_tool(), String::new()).await,
        ]
    }
}

/// Enable or disable the stderr trace of tool calls.
pub fn set_trace_tool_calls(enabled: bool) {
    TRACE_TOOL_CALLS.store(enabled, Ordering::Relaxed);
}

/// Mark the start of a tool call.
pub(crate) fn start_tool_call() -> Instant {
    Instant::now()
}

/// Log a finished tool call and, when tracing is on, echo it to stderr.
pub(crate) fn finish_tool_call(start: Instant, tool: &str, target: &str, summary: String) {
    let elapsed = start.elapsed();
    tracing::info!(tool, target, %summary, elapsed_ms = elapsed.as_millis() as u64, "tool call");

    if TRACE_TOOL_CALLS.load(Ordering::Relaxed) {
        eprintln!(
            "  {} {} {}",
            "→".cyan(),
            tool.bold(),
            format!("{target}  ({summary}, {}ms)", elapsed.as_millis()).dimmed()
        );
    }
}

/// JSON schema for a tool's argument type, without the meta keys that
/// some providers reject.
pub(crate) fn parameters_schema<T: JsonSchema>() -> serde_json::Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| json!({ "type": "object" }));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}

/// Resolve the directory a tool call targets.
///
/// Relative paths hang off `default_root`; no value means `default_root`.
/// The result must stay inside `default_root`.
pub(crate) fn resolve_root(
    tool: &'static str,
    default_root: &Path,
    requested: Option<&str>,
) -> Result<PathBuf, ToolError> {
    match requested.map(str::trim).filter(|r| !r.is_empty()) {
        Some(dir) => path_guard::resolve_under_root(default_root, dir)
            .map_err(|e| ToolError::new(tool, e.to_string())),
        None => Ok(default_root.to_path_buf()),
    }
}
