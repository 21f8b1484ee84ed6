//! MarkdownFileTool: writes a Markdown document under the project root.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolError;
use crate::filesystem::FileSystem;
use crate::markdown;
use crate::models::{MarkdownDocumentRequest, MarkdownSection, MarkdownWriteResult};

/// Arguments for the generate_markdown_file tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct MarkdownFileArgs {
    /// Directory the file must stay inside, relative to the project root. Omit to use the project root.
    #[serde(default)]
    pub root_dir: Option<String>,
    /// Path of the file to write, relative to root_dir (e.g. 'docs/review.md').
    pub relative_path: String,
    /// Document title, rendered as a level-one heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form Markdown appended after the sections.
    #[serde(default)]
    pub content: Option<String>,
    /// Level-two sections, in order.
    #[serde(default)]
    pub sections: Vec<MarkdownSection>,
    /// YAML front matter keys and values.
    #[serde(default)]
    pub front_matter: Option<IndexMap<String, serde_json::Value>>,
    /// Replace the file if it already exists.
    #[serde(default)]
    pub overwrite: bool,
}

/// Rig-core tool wrapping [`markdown::generate_markdown_file`].
#[derive(Clone)]
pub struct MarkdownFileTool {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl MarkdownFileTool {
    pub fn new(fs: Arc<dyn FileSystem>, root: PathBuf) -> Self {
        Self { fs, root }
    }

    pub fn request(&self, args: MarkdownFileArgs) -> Result<MarkdownDocumentRequest, ToolError> {
        if args.relative_path.trim().is_empty() {
            return Err(ToolError::new(Self::NAME, "relative_path must not be empty"));
        }
        if let Some(section) = args.sections.iter().find(|s| s.heading.trim().is_empty()) {
            return Err(ToolError::new(
                Self::NAME,
                format!("section heading must not be empty (body: {:?})", section.body),
            ));
        }
        let root = super::resolve_root(Self::NAME, &self.root, args.root_dir.as_deref())?;
        Ok(MarkdownDocumentRequest {
            root,
            relative_path: args.relative_path,
            title: args.title,
            content: args.content,
            sections: args.sections,
            front_matter: args.front_matter,
            overwrite: args.overwrite,
        })
    }
}

impl Tool for MarkdownFileTool {
    const NAME: &'static str = "generate_markdown_file";
    type Error = ToolError;
    type Args = MarkdownFileArgs;
    type Output = MarkdownWriteResult;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Write a Markdown document built from optional YAML front matter, \
                a title, ordered sections and free-form content. The path must stay \
                inside the project. Existing files are only replaced when overwrite is true."
                .to_string(),
            parameters: super::parameters_schema::<MarkdownFileArgs>(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let start = super::start_tool_call();
        let request = self.request(args)?;
        let result = markdown::generate_markdown_file(self.fs.as_ref(), &request).await;
        let summary = match &result {
            Ok(r) if r.overwritten => format!("{} bytes, overwritten", r.bytes_written),
            Ok(r) => format!("{} bytes", r.bytes_written),
            Err(e) => format!("error: {e}"),
        };
        super::finish_tool_call(start, Self::NAME, &request.relative_path, summary);
        result.map_err(|e| ToolError::new(Self::NAME, e.to_string()))
    }
}
