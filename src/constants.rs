//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and core limits so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "gitscribe";

/// Package version from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.gitscribe.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".gitscribe.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "gitscribe";

// ── Commit message limits ───────────────────────────────────────────

/// Default maximum length of a commit subject, in characters.
pub const DEFAULT_MAX_SUBJECT_LENGTH: usize = 72;

/// Hard upper bound accepted for `max_subject_length`.
pub const MAX_SUBJECT_LENGTH_CAP: usize = 100;

/// Number of file bullets listed in a commit body before summarising.
pub const MAX_BODY_FILES: usize = 20;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "GITSCRIBE_PROVIDER";
pub const ENV_MODEL: &str = "GITSCRIBE_MODEL";
pub const ENV_API_KEY: &str = "GITSCRIBE_API_KEY";
pub const ENV_BASE_URL: &str = "GITSCRIBE_BASE_URL";
pub const ENV_MAX_TURNS: &str = "GITSCRIBE_MAX_TURNS";
