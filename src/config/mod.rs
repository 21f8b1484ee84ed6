//! Configuration loading and layering.
//!
//! Handles `.gitscribe.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering.

pub mod loader;

pub use loader::{AgentConfig, CommitConfig, Config, ConfigError, ProviderConfig};
