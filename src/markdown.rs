//! Markdown document composition and guarded file output.
//!
//! Documents are assembled from optional front matter, a title, ordered
//! sections and free-form content, then written under a root directory.
//! Targets are resolved through [`crate::path_guard`] and existing files
//! are only replaced when the request asks for it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::filesystem::FileSystem;
use crate::models::{MarkdownDocumentRequest, MarkdownWriteResult};
use crate::path_guard::{self, PathGuardError};

/// Errors from the Markdown writer.
#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error(transparent)]
    PathGuard(#[from] PathGuardError),

    #[error("file already exists: {0} (set overwrite to replace it)")]
    FileExists(String),

    #[error("path does not name a file: '{0}'")]
    NotAFile(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Render `request` and write it under `request.root`.
pub async fn generate_markdown_file(
    fs: &dyn FileSystem,
    request: &MarkdownDocumentRequest,
) -> Result<MarkdownWriteResult, MarkdownError> {
    let path = path_guard::resolve_under_root(&request.root, &request.relative_path)?;
    let root = path_guard::resolve_under_root(&request.root, "")?;
    let parent = match path.parent() {
        Some(parent) if path != root => parent.to_path_buf(),
        _ => return Err(MarkdownError::NotAFile(request.relative_path.clone())),
    };

    path_guard::ensure_dir(fs, &parent)
        .await
        .map_err(|source| MarkdownError::Io {
            path: parent.clone(),
            source,
        })?;

    let existed = fs.exists(&path).await.map_err(|source| MarkdownError::Io {
        path: path.clone(),
        source,
    })?;
    if existed && !request.overwrite {
        return Err(MarkdownError::FileExists(request.relative_path.clone()));
    }

    let document = render_markdown(request);
    fs.write(&path, document.as_bytes())
        .await
        .map_err(|source| MarkdownError::Io {
            path: path.clone(),
            source,
        })?;

    debug!(path = %path.display(), bytes = document.len(), existed, "wrote markdown file");

    Ok(MarkdownWriteResult {
        path,
        bytes_written: document.len(),
        created: !existed,
        overwritten: existed,
    })
}

/// Compose the document text for `request`.
///
/// Parts are front matter, `# title`, one `## heading` block per section
/// and the free-form content. Empty parts are skipped, the rest joined by
/// blank lines, and the result ends in exactly one newline.
pub fn render_markdown(request: &MarkdownDocumentRequest) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(front_matter) = request.front_matter.as_ref().filter(|m| !m.is_empty()) {
        parts.push(render_front_matter(front_matter));
    }

    if let Some(title) = non_blank(request.title.as_deref()) {
        parts.push(format!("# {title}"));
    }

    for section in &request.sections {
        let mut block = format!("## {}", section.heading.trim());
        if let Some(body) = section.body.as_deref().filter(|b| !b.trim().is_empty()) {
            block.push_str("\n\n");
            block.push_str(body);
        }
        parts.push(block);
    }

    if let Some(content) = request.content.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(content.to_string());
    }

    // Only the joined document is trimmed; bodies keep their indentation.
    let joined = parts.join("\n\n");

    format!("{}\n", joined.trim())
}

/// Render a minimal YAML block.
///
/// Scalars are JSON-encoded (valid YAML flow scalars), arrays become a
/// dash list and objects are expanded one level with JSON-encoded values.
fn render_front_matter(map: &indexmap::IndexMap<String, serde_json::Value>) -> String {
    use serde_json::Value;

    let mut lines = vec!["---".to_string()];
    for (key, value) in map {
        match value {
            Value::Array(items) if items.is_empty() => lines.push(format!("{key}: []")),
            Value::Array(items) => {
                lines.push(format!("{key}:"));
                lines.extend(items.iter().map(|item| format!("  - {item}")));
            }
            Value::Object(fields) if fields.is_empty() => lines.push(format!("{key}: {{}}")),
            Value::Object(fields) => {
                lines.push(format!("{key}:"));
                lines.extend(fields.iter().map(|(k, v)| format!("  {k}: {v}")));
            }
            scalar => lines.push(format!("{key}: {scalar}")),
        }
    }
    lines.push("---".to_string());
    lines.join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::filesystem::LocalFs;
    use crate::models::MarkdownSection;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request(root: &Path, relative_path: &str) -> MarkdownDocumentRequest {
        MarkdownDocumentRequest {
            root: root.to_path_buf(),
            relative_path: relative_path.to_string(),
            ..MarkdownDocumentRequest::default()
        }
    }

    #[test]
    fn renders_parts_in_order() {
        let mut front_matter = IndexMap::new();
        front_matter.insert("a".to_string(), json!("x"));

        let req = MarkdownDocumentRequest {
            title: Some("T".to_string()),
            sections: vec![MarkdownSection {
                heading: "H".to_string(),
                body: Some("B".to_string()),
            }],
            front_matter: Some(front_matter),
            ..request(Path::new("/r"), "doc.md")
        };

        assert_eq!(
            render_markdown(&req),
            "---\na: \"x\"\n---\n\n# T\n\n## H\n\nB\n"
        );
    }

    #[test]
    fn front_matter_shapes() {
        let mut front_matter = IndexMap::new();
        front_matter.insert("title".to_string(), json!("Review: \"quoted\""));
        front_matter.insert("count".to_string(), json!(3));
        front_matter.insert("draft".to_string(), json!(false));
        front_matter.insert("tags".to_string(), json!(["git", "review"]));
        front_matter.insert("meta".to_string(), json!({"author": "ci", "run": 7}));
        front_matter.insert("empty".to_string(), json!([]));

        let rendered = render_front_matter(&front_matter);
        assert_eq!(
            rendered,
            "---\n\
             title: \"Review: \\\"quoted\\\"\"\n\
             count: 3\n\
             draft: false\n\
             tags:\n  - \"git\"\n  - \"review\"\n\
             meta:\n  author: \"ci\"\n  run: 7\n\
             empty: []\n\
             ---"
        );

        let body = rendered.trim_matches('-').trim();
        let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(body).unwrap();
        assert_eq!(parsed["title"].as_str(), Some("Review: \"quoted\""));
        assert_eq!(parsed["tags"][1].as_str(), Some("review"));
        assert_eq!(parsed["meta"]["run"].as_u64(), Some(7));
    }

    #[test]
    fn empty_front_matter_is_omitted() {
        let req = MarkdownDocumentRequest {
            front_matter: Some(IndexMap::new()),
            content: Some("Body text.".to_string()),
            ..request(Path::new("/r"), "a.md")
        };
        assert_eq!(render_markdown(&req), "Body text.\n");
    }

    #[test]
    fn section_without_body_and_trailing_content() {
        let req = MarkdownDocumentRequest {
            sections: vec![
                MarkdownSection {
                    heading: "Summary".to_string(),
                    body: None,
                },
                MarkdownSection {
                    heading: "Details".to_string(),
                    body: Some("- item".to_string()),
                },
            ],
            content: Some("Closing notes.\n\n".to_string()),
            ..request(Path::new("/r"), "a.md")
        };
        assert_eq!(
            render_markdown(&req),
            "## Summary\n\n## Details\n\n- item\n\nClosing notes.\n"
        );
    }

    #[test]
    fn indented_bodies_keep_leading_whitespace() {
        let req = MarkdownDocumentRequest {
            sections: vec![MarkdownSection {
                heading: "Code".to_string(),
                body: Some("    let x = 1;\n    let y = 2;".to_string()),
            }],
            content: Some("    indented block".to_string()),
            ..request(Path::new("/r"), "a.md")
        };
        assert_eq!(
            render_markdown(&req),
            "## Code\n\n    let x = 1;\n    let y = 2;\n\n    indented block\n"
        );
    }

    #[test]
    fn blank_body_and_content_are_dropped() {
        let req = MarkdownDocumentRequest {
            sections: vec![MarkdownSection {
                heading: "Notes".to_string(),
                body: Some("   \n".to_string()),
            }],
            content: Some("\n\t".to_string()),
            ..request(Path::new("/r"), "a.md")
        };
        assert_eq!(render_markdown(&req), "## Notes\n");
    }

    #[test]
    fn empty_document_is_single_newline() {
        assert_eq!(render_markdown(&request(Path::new("/r"), "a.md")), "\n");
    }

    #[tokio::test]
    async fn writes_new_file_and_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let req = MarkdownDocumentRequest {
            title: Some("Überblick".to_string()),
            ..request(dir.path(), "reports/2024/review.md")
        };

        let result = generate_markdown_file(&LocalFs, &req).await.unwrap();
        let written = std::fs::read_to_string(dir.path().join("reports/2024/review.md")).unwrap();

        assert_eq!(written, "# Überblick\n");
        assert_eq!(result.bytes_written, written.len());
        assert_ne!(result.bytes_written, written.chars().count());
        assert!(result.created);
        assert!(!result.overwritten);
        assert!(result.path.is_absolute());
    }

    #[tokio::test]
    async fn existing_file_is_not_overwritten_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path(), "notes.md");
        req.content = Some("first".to_string());
        generate_markdown_file(&LocalFs, &req).await.unwrap();

        req.content = Some("second".to_string());
        let err = generate_markdown_file(&LocalFs, &req).await.unwrap_err();
        assert!(matches!(err, MarkdownError::FileExists(ref p) if p == "notes.md"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.md")).unwrap(),
            "first\n"
        );
    }

    #[tokio::test]
    async fn overwrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.md"), "a much longer previous body\n").unwrap();

        let mut req = request(dir.path(), "notes.md");
        req.content = Some("short".to_string());
        req.overwrite = true;

        let result = generate_markdown_file(&LocalFs, &req).await.unwrap();
        assert!(!result.created);
        assert!(result.overwritten);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.md")).unwrap(),
            "short\n"
        );
    }

    #[tokio::test]
    async fn traversal_is_rejected_before_writing() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("root");
        std::fs::create_dir(&root).unwrap();

        let req = request(&root, "../outside.md");
        let err = generate_markdown_file(&LocalFs, &req).await.unwrap_err();

        assert!(matches!(
            err,
            MarkdownError::PathGuard(PathGuardError::PathTraversal { .. })
        ));
        assert!(!outer.path().join("outside.md").exists());
    }

    #[tokio::test]
    async fn root_itself_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_markdown_file(&LocalFs, &request(dir.path(), "."))
            .await
            .unwrap_err();
        assert!(matches!(err, MarkdownError::NotAFile(_)));
    }
}
