//! CommitMessageTool: proposes a Conventional Commit message.

use std::path::PathBuf;
use std::sync::Arc;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ToolError;
use crate::commit;
use crate::config::CommitConfig;
use crate::models::{CommitMessageRequest, CommitMessageResult, CommitType};
use crate::vcs::VersionControl;

/// Arguments for the generate_commit_message tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CommitMessageArgs {
    /// Repository directory inside the project, relative to the project root. Omit to use the project root.
    #[serde(default)]
    pub root_dir: Option<String>,
    /// Conventional Commit type. Omit to infer it from the changed files.
    #[serde(default, rename = "type")]
    pub commit_type: Option<CommitType>,
    /// Scope placed in parentheses after the type. Omit to derive it from the changed paths.
    #[serde(default)]
    pub scope: Option<String>,
    /// Subject line. Omit to derive it from the changed files.
    #[serde(default)]
    pub subject: Option<String>,
    /// Append a bullet list of changed files. Defaults to the configured value.
    #[serde(default)]
    pub include_body: Option<bool>,
    /// Maximum subject length in characters (1-100).
    #[serde(default)]
    #[schemars(range(min = 1, max = 100))]
    pub max_subject_length: Option<usize>,
}

/// Tool output: the rendered message plus its parts.
#[derive(Debug, Serialize)]
pub struct CommitMessageOutput {
    pub message: String,
    #[serde(flatten)]
    pub result: CommitMessageResult,
}

/// Rig-core tool wrapping [`commit::generate_commit_message`].
#[derive(Clone)]
pub struct CommitMessageTool {
    vcs: Arc<dyn VersionControl>,
    root: PathBuf,
    defaults: CommitConfig,
}

impl CommitMessageTool {
    pub fn new(vcs: Arc<dyn VersionControl>, root: PathBuf, defaults: CommitConfig) -> Self {
        Self {
            vcs,
            root,
            defaults,
        }
    }

    /// Turn model arguments into a validated request.
    pub fn request(&self, args: CommitMessageArgs) -> Result<CommitMessageRequest, ToolError> {
        let request = CommitMessageRequest {
            root: super::resolve_root(Self::NAME, &self.root, args.root_dir.as_deref())?,
            commit_type: args.commit_type,
            scope: args.scope,
            subject: args.subject,
            include_body: args.include_body.unwrap_or(self.defaults.include_body),
            max_subject_length: args
                .max_subject_length
                .unwrap_or(self.defaults.max_subject_length),
        };
        request
            .validate()
            .map_err(|message| ToolError::new(Self::NAME, message))?;
        Ok(request)
    }
}

impl Tool for CommitMessageTool {
    const NAME: &'static str = "generate_commit_message";
    type Error = ToolError;
    type Args = CommitMessageArgs;
    type Output = CommitMessageOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Generate a Conventional Commit message (type(scope): subject, \
                followed by a list of changed files) for the uncommitted changes in a \
                git repository. Type, scope and subject are inferred from the changed \
                paths unless you pass them explicitly."
                .to_string(),
            parameters: super::parameters_schema::<CommitMessageArgs>(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let start = super::start_tool_call();
        let request = self.request(args)?;
        let result = commit::generate_commit_message(self.vcs.as_ref(), &request).await;
        let summary = match &result {
            Ok(r) => r.header.clone(),
            Err(e) => format!("error: {e}"),
        };
        super::finish_tool_call(start, Self::NAME, &request.root.display().to_string(), summary);

        let result = result.map_err(|e| ToolError::new(Self::NAME, e.to_string()))?;
        Ok(CommitMessageOutput {
            message: result.message(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::InMemoryVcs;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tool(vcs: InMemoryVcs) -> CommitMessageTool {
        CommitMessageTool::new(Arc::new(vcs), PathBuf::from("/repo"), CommitConfig::default())
    }

    fn args(value: serde_json::Value) -> CommitMessageArgs {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn generates_message_for_new_file() {
        let tool = tool(InMemoryVcs::repository().created("src/a.ts", "+export {}"));
        let output = tool.call(args(json!({}))).await.unwrap();

        assert_eq!(output.result.header, "feat(src): add a.ts");
        assert_eq!(output.message, "feat(src): add a.ts\n\n- code: src/a.ts");
    }

    #[tokio::test]
    async fn explicit_type_is_parsed_from_lowercase() {
        let tool = tool(InMemoryVcs::repository().modified("src/lib.rs", "-a\n+b"));
        let output = tool
            .call(args(json!({ "type": "fix", "include_body": false })))
            .await
            .unwrap();
        assert_eq!(output.message, "fix(src): update lib.rs");
    }

    #[test]
    fn unknown_type_is_rejected_at_deserialization() {
        let parsed: Result<CommitMessageArgs, _> =
            serde_json::from_value(json!({ "type": "feature" }));
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn out_of_range_subject_length_is_rejected() {
        let tool = tool(InMemoryVcs::repository());
        for bad in [0, 101] {
            let err = tool
                .call(args(json!({ "max_subject_length": bad })))
                .await
                .unwrap_err();
            assert!(err.message.contains("between 1 and 100"), "{err}");
        }
    }

    #[tokio::test]
    async fn not_a_repository_is_reported_to_the_model() {
        let tool = tool(InMemoryVcs::not_repository());
        let err = tool.call(CommitMessageArgs::default()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "generate_commit_message failed: failed to generate commit message: \
             not a git repository: /repo"
        );
    }

    #[test]
    fn request_uses_configured_defaults() {
        let tool = CommitMessageTool::new(
            Arc::new(InMemoryVcs::repository()),
            PathBuf::from("/repo"),
            CommitConfig {
                max_subject_length: 50,
                include_body: false,
            },
        );
        let request = tool
            .request(args(json!({ "root_dir": "packages/web" })))
            .unwrap();
        assert_eq!(request.root, PathBuf::from("/repo/packages/web"));
        assert_eq!(request.max_subject_length, 50);
        assert!(!request.include_body);
    }

    #[tokio::test]
    async fn definition_exposes_type_enum() {
        let tool = tool(InMemoryVcs::repository());
        let def = tool.definition(String::new()).await;
        assert_eq!(def.name, "generate_commit_message");
        let schema = def.parameters.to_string();
        assert!(schema.contains("\"refactor\""));
        assert!(schema.contains("max_subject_length"));
    }
}
