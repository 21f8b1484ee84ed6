//! Integration tests for the model-facing tools: argument decoding,
//! dispatch into the core operations, and the JSON sent back.

use std::path::PathBuf;
use std::sync::Arc;

use gitscribe::config::CommitConfig;
use gitscribe::filesystem::LocalFs;
use gitscribe::tools::Toolbox;
use gitscribe::vcs::InMemoryVcs;
use rig::tool::Tool;
use serde_json::Value;

fn toolbox(vcs: InMemoryVcs, root: PathBuf) -> Toolbox {
    Toolbox {
        vcs: Arc::new(vcs),
        fs: Arc::new(LocalFs),
        root,
        commit: CommitConfig::default(),
    }
}

#[tokio::test]
async fn commit_message_tool_round_trip() {
    let tools = toolbox(
        InMemoryVcs::repository().created("src/a.ts", "+1"),
        PathBuf::from("/repo"),
    );
    let tool = tools.commit_message_tool();

    let args = serde_json::from_str(r#"{"include_body": true}"#).unwrap();
    let output = tool.call(args).await.unwrap();
    let json: Value = serde_json::to_value(&output).unwrap();

    assert_eq!(json["message"], "feat(src): add a.ts\n\n- code: src/a.ts");
    assert_eq!(json["type"], "feat");
    assert_eq!(json["scope"], "src");
    assert_eq!(json["header"], "feat(src): add a.ts");
}

#[tokio::test]
async fn file_changes_tool_serializes_entries() {
    let tools = toolbox(
        InMemoryVcs::repository().modified("README.md", "@@ -1 +1 @@\n-a\n+b"),
        PathBuf::from("/repo"),
    );

    let entries = tools
        .file_changes_tool()
        .call(serde_json::from_str("{}").unwrap())
        .await
        .unwrap();
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{ "file": "README.md", "diff": "@@ -1 +1 @@\n-a\n+b" }])
    );
}

#[tokio::test]
async fn markdown_tool_writes_under_default_root() {
    let dir = tempfile::tempdir().unwrap();
    let tools = toolbox(InMemoryVcs::repository(), dir.path().to_path_buf());

    let args = serde_json::from_str(
        r#"{"relative_path": "notes/review.md", "title": "Review", "content": "All good."}"#,
    )
    .unwrap();
    let result = tools.markdown_file_tool().call(args).await.unwrap();

    let written = std::fs::read_to_string(dir.path().join("notes/review.md")).unwrap();
    assert_eq!(written, "# Review\n\nAll good.\n");
    assert_eq!(result.bytes_written, written.len());
}

#[tokio::test]
async fn root_dir_argument_scopes_markdown_writes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("site")).unwrap();
    let tools = toolbox(InMemoryVcs::repository(), dir.path().to_path_buf());

    let escape = serde_json::from_str(r#"{"root_dir": "site", "relative_path": "../top.md"}"#)
        .unwrap();
    let err = tools.markdown_file_tool().call(escape).await.unwrap_err();
    assert!(err.to_string().contains("path traversal blocked"), "{err}");
    assert!(!dir.path().join("top.md").exists());
}

#[tokio::test]
async fn every_definition_has_an_object_schema() {
    let tools = toolbox(InMemoryVcs::repository(), PathBuf::from("/repo"));
    let definitions = tools.definitions().await;

    assert_eq!(definitions.len(), 3);
    for definition in definitions {
        assert_eq!(definition.parameters["type"], "object", "{}", definition.name);
        assert!(!definition.description.is_empty());
    }
}

#[tokio::test]
async fn markdown_schema_requires_relative_path() {
    let tools = toolbox(InMemoryVcs::repository(), PathBuf::from("/repo"));
    let definition = tools.markdown_file_tool().definition(String::new()).await;

    let required: Vec<&str> = definition.parameters["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(required, vec!["relative_path"]);
}

#[tokio::test]
async fn git_tools_stay_inside_the_project() {
    let tools = toolbox(
        InMemoryVcs::repository().modified("a.rs", "+a"),
        PathBuf::from("/repo"),
    );

    let args = serde_json::from_str(r#"{"root_dir": "/srv/elsewhere"}"#).unwrap();
    let err = tools.commit_message_tool().call(args).await.unwrap_err();
    assert!(err.to_string().starts_with("generate_commit_message failed: path traversal blocked"), "{err}");

    let args = serde_json::from_str(r#"{"root_dir": "../sibling"}"#).unwrap();
    let err = tools.file_changes_tool().call(args).await.unwrap_err();
    assert!(err.to_string().contains("path traversal blocked"), "{err}");
}
