//! gitscribe: AI-assisted review of local git changes (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod changes;
pub mod classify;
pub mod commit;
pub mod config;
pub mod constants;
pub mod env;
pub mod filesystem;
pub mod markdown;
pub mod models;
pub mod path_guard;
pub mod prompt;
pub mod providers;
pub mod review;
pub mod tools;
pub mod vcs;
