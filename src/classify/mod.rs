//! Path-based file classification.
//!
//! Every predicate works on the path string alone; nothing is read from
//! disk. Paths are normalized to forward slashes first so Windows-style
//! input classifies the same way.

pub mod scope;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use scope::top_level_scope;

/// Top-level names (files or directories) that never take part in review
/// or classification.
const EXCLUDED: &[&str] = &[
    ".git",
    "node_modules",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "dist",
    "build",
    "out",
    "target",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
    ".cache",
];

const DOC_EXTENSIONS: &[&str] = &[".md", ".mdx", ".markdown", ".rst", ".adoc", ".txt"];

const DOC_DIRS: &[&str] = &["docs", "doc"];

const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "__mocks__", "spec"];

const CONFIG_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "jsconfig.json",
    "deno.json",
    "cargo.toml",
    "rust-toolchain.toml",
    "pyproject.toml",
    "setup.cfg",
    "requirements.txt",
    "go.mod",
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "makefile",
    ".gitignore",
    ".gitattributes",
    ".dockerignore",
    ".editorconfig",
    ".env.example",
    ".prettierrc",
    ".eslintrc",
    ".npmrc",
    ".nvmrc",
    ".gitlab-ci.yml",
];

const CI_DIRS: &[&str] = &[".github/workflows", ".circleci"];

/// Base names like `*.test.ts`, `*.spec.js`, `*_test.go`, `test_*.py`.
static TEST_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[._](?:test|spec)\.[a-z0-9]+$)|(?:^test_.+\.py$)").unwrap()
});

/// Base names like `vite.config.ts`, `.babelrc`, `.stylelintrc.json`, `*.toml`.
static CONFIG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\.config\.(?:js|cjs|mjs|ts)$)|(?:^\.[a-z0-9_.-]*rc(?:\.(?:json|js|cjs|ya?ml))?$)|(?:\.(?:toml|ini)$)",
    )
    .unwrap()
});

/// The display category of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Documentation,
    Test,
    Configuration,
    Code,
}

impl FileKind {
    /// Short label used in commit bodies.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Documentation => "docs",
            FileKind::Test => "test",
            FileKind::Configuration => "config",
            FileKind::Code => "code",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification rules in precedence order; the first match wins and
/// anything unmatched is [`FileKind::Code`].
const KIND_RULES: &[(fn(&str) -> bool, FileKind)] = &[
    (is_doc_file, FileKind::Documentation),
    (is_test_file, FileKind::Test),
    (is_config_file, FileKind::Configuration),
];

/// Classify a path by the first matching rule in [`KIND_RULES`].
pub fn classify(path: &str) -> FileKind {
    KIND_RULES
        .iter()
        .find(|(matches, _)| matches(path))
        .map_or(FileKind::Code, |(_, kind)| *kind)
}

/// Whether the path belongs to VCS internals, dependencies, lock files or
/// build output.
pub fn is_excluded(path: &str) -> bool {
    let path = normalize(path);
    EXCLUDED.iter().any(|name| {
        path == *name
            || path
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

pub fn is_doc_file(path: &str) -> bool {
    let lower = normalize(path).to_lowercase();
    let base = base_name(&lower);

    DOC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        || DOC_DIRS.iter().any(|dir| has_dir_segment(&lower, dir))
        || base == "readme"
        || base.starts_with("readme.")
}

pub fn is_test_file(path: &str) -> bool {
    let lower = normalize(path).to_lowercase();

    TEST_DIRS.iter().any(|dir| has_dir_segment(&lower, dir))
        || TEST_NAME_RE.is_match(base_name(&lower))
}

pub fn is_config_file(path: &str) -> bool {
    let lower = normalize(path).to_lowercase();
    let base = base_name(&lower);

    CONFIG_FILES.contains(&base)
        || CI_DIRS.iter().any(|dir| has_dir_segment(&lower, dir))
        || CONFIG_NAME_RE.is_match(base)
}

/// Final path segment.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Unify separators and drop a leading `./`.
pub(crate) fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    match unified.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => unified,
    }
}

/// Whether `dir` (which may itself contain `/`) appears as a whole
/// directory segment of `path`.
fn has_dir_segment(path: &str, dir: &str) -> bool {
    path.starts_with(&format!("{dir}/")) || path.contains(&format!("/{dir}/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_top_level_names_and_prefixes() {
        assert!(is_excluded(".git"));
        assert!(is_excluded(".git/HEAD"));
        assert!(is_excluded("node_modules/react/index.js"));
        assert!(is_excluded("package-lock.json"));
        assert!(is_excluded("dist/bundle.js"));
        assert!(is_excluded("coverage/lcov.info"));
        assert!(is_excluded(".next/cache/x"));
        assert!(is_excluded("target\\debug\\app"));
    }

    #[test]
    fn exclusion_requires_whole_segment() {
        assert!(!is_excluded("distribution/notes.md"));
        assert!(!is_excluded("builder.rs"));
        assert!(!is_excluded("src/dist/file.js"));
        assert!(!is_excluded(".github/workflows/ci.yml"));
    }

    #[test]
    fn doc_files() {
        assert!(is_doc_file("README.md"));
        assert!(is_doc_file("readme"));
        assert!(is_doc_file("ReadMe.rst"));
        assert!(is_doc_file("docs/guide.html"));
        assert!(is_doc_file("packages/app/docs/setup.png"));
        assert!(is_doc_file("CHANGELOG.MD"));
        assert!(!is_doc_file("src/main.rs"));
        assert!(!is_doc_file("src/docsearch.rs"));
    }

    #[test]
    fn test_files() {
        assert!(is_test_file("tests/integration.rs"));
        assert!(is_test_file("src/__tests__/app.tsx"));
        assert!(is_test_file("src/button.test.tsx"));
        assert!(is_test_file("src/button.spec.ts"));
        assert!(is_test_file("pkg/server_test.go"));
        assert!(is_test_file("test_parser.py"));
        assert!(!is_test_file("src/testing.rs"));
        assert!(!is_test_file("src/contest.ts"));
    }

    #[test]
    fn config_files() {
        assert!(is_config_file("package.json"));
        assert!(is_config_file("Cargo.toml"));
        assert!(is_config_file("Dockerfile"));
        assert!(is_config_file("apps/web/tsconfig.json"));
        assert!(is_config_file(".github/workflows/release.yml"));
        assert!(is_config_file("vite.config.ts"));
        assert!(is_config_file(".babelrc"));
        assert!(is_config_file(".stylelintrc.json"));
        assert!(is_config_file("setup.ini"));
        assert!(!is_config_file("src/config.rs"));
        assert!(!is_config_file("src/arc"));
    }

    #[test]
    fn classify_precedence_docs_over_test_over_config() {
        // Matches doc and test rules.
        assert_eq!(classify("tests/README.md"), FileKind::Documentation);
        // Matches test and config rules.
        assert_eq!(classify("tests/fixtures/package.json"), FileKind::Test);
        assert_eq!(classify("Cargo.toml"), FileKind::Configuration);
        assert_eq!(classify("src/lib.rs"), FileKind::Code);
    }

    #[test]
    fn labels() {
        assert_eq!(FileKind::Documentation.to_string(), "docs");
        assert_eq!(FileKind::Test.label(), "test");
        assert_eq!(FileKind::Configuration.label(), "config");
        assert_eq!(FileKind::Code.label(), "code");
    }

    #[test]
    fn normalize_unifies_separators() {
        assert_eq!(normalize(".\\src\\main.rs"), "src/main.rs");
        assert_eq!(normalize("./docs/a.md"), "docs/a.md");
        assert_eq!(base_name("a/b/c.txt"), "c.txt");
        assert_eq!(base_name("c.txt"), "c.txt");
    }
}
