//! Commit scope derivation from changed paths.

/// Derive a commit scope: the first segment of the first path that lives
/// below the root.
///
/// Returns `None` for an empty list or when every path is a top-level
/// file. Callers filter excluded paths beforehand.
pub fn top_level_scope<S: AsRef<str>>(paths: &[S]) -> Option<String> {
    if let Some(scope) = paths.iter().find_map(|p| nested_first_segment(p.as_ref())) {
        return Some(scope);
    }

    // A lone path gets a second look with the same rule. For a single
    // top-level file this still yields `None`.
    if let [only] = paths {
        return nested_first_segment(only.as_ref());
    }

    None
}

/// First segment of `path` if it has more than one segment.
fn nested_first_segment(path: &str) -> Option<String> {
    let path = super::normalize(path);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let first = segments.next()?;
    segments.next().map(|_| first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_scope() {
        assert_eq!(top_level_scope::<&str>(&[]), None);
    }

    #[test]
    fn nested_path_yields_first_segment() {
        assert_eq!(top_level_scope(&["src/a.ts"]), Some("src".to_string()));
    }

    #[test]
    fn first_nested_path_wins() {
        let paths = ["README.md", "packages/core/lib.rs", "apps/web/main.ts"];
        assert_eq!(top_level_scope(&paths), Some("packages".to_string()));
    }

    #[test]
    fn top_level_files_only_have_no_scope() {
        assert_eq!(top_level_scope(&["Cargo.toml", "README.md"]), None);
    }

    #[test]
    fn single_top_level_file_has_no_scope() {
        assert_eq!(top_level_scope(&["README.md"]), None);
    }

    #[test]
    fn windows_separators_are_segments() {
        assert_eq!(
            top_level_scope(&["crates\\cli\\main.rs".to_string()]),
            Some("crates".to_string())
        );
    }
}
