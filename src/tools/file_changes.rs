//! FileChangesTool: per-file diffs of the working tree.

use std::path::PathBuf;
use std::sync::Arc;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolError;
use crate::changes;
use crate::models::DiffEntry;
use crate::vcs::VersionControl;

/// Arguments for the get_file_changes_in_directory tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FileChangesArgs {
    /// Repository directory inside the project, relative to the project root. Omit to use the project root.
    #[serde(default)]
    pub root_dir: Option<String>,
}

/// Rig-core tool wrapping [`changes::get_file_changes_in_directory`].
#[derive(Clone)]
pub struct FileChangesTool {
    vcs: Arc<dyn VersionControl>,
    root: PathBuf,
}

impl FileChangesTool {
    pub fn new(vcs: Arc<dyn VersionControl>, root: PathBuf) -> Self {
        Self { vcs, root }
    }
}

impl Tool for FileChangesTool {
    const NAME: &'static str = "get_file_changes_in_directory";
    type Error = ToolError;
    type Args = FileChangesArgs;
    type Output = Vec<DiffEntry>;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List every changed file in a git repository together with its \
                zero-context unified diff. Lock files, build output and dependency \
                directories are left out. Start a review with this tool."
                .to_string(),
            parameters: super::parameters_schema::<FileChangesArgs>(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let start = super::start_tool_call();
        let root = super::resolve_root(Self::NAME, &self.root, args.root_dir.as_deref())?;
        let result = changes::get_file_changes_in_directory(self.vcs.as_ref(), &root).await;
        let summary = match &result {
            Ok(entries) if entries.len() == 1 => "1 file".to_string(),
            Ok(entries) => format!("{} files", entries.len()),
            Err(e) => format!("error: {e}"),
        };
        super::finish_tool_call(start, Self::NAME, &root.display().to_string(), summary);
        result.map_err(|e| ToolError::new(Self::NAME, e.to_string()))
    }
}
