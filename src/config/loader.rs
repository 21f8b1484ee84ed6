//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.gitscribe.toml` in repo root
//! 4. `~/.config/gitscribe/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    CONFIG_DIR, CONFIG_FILENAME, DEFAULT_MAX_SUBJECT_LENGTH, ENV_API_KEY, ENV_BASE_URL,
    ENV_MAX_TURNS, ENV_MODEL, ENV_PROVIDER,
};
use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
    pub commit: CommitConfig,
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Anthropic,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Tool-calling agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum model turns (tool round-trips) per review.
    pub max_turns: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}

/// Defaults for commit message synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    pub max_subject_length: usize,
    pub include_body: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_subject_length: DEFAULT_MAX_SUBJECT_LENGTH,
            include_body: true,
        }
    }
}

/// One config file as written. Only keys present in the file are `Some`,
/// so a later file can restore a value an earlier one changed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    provider: ProviderLayer,
    agent: AgentLayer,
    commit: CommitLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderLayer {
    name: Option<ProviderName>,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AgentLayer {
    max_turns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommitLayer {
    max_subject_length: Option<usize>,
    include_body: Option<bool>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, repo-local config, then applies
    /// environment variable overrides.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(root) = repo_root {
            let local_path = root.join(CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config layer from a specific file.
    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this config. Keys the file sets win.
    fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            provider,
            agent,
            commit,
        } = layer;

        if let Some(name) = provider.name {
            self.provider.name = name;
        }
        if let Some(model) = provider.model {
            self.provider.model = model;
        }
        if provider.base_url.is_some() {
            self.provider.base_url = provider.base_url;
        }
        if provider.api_key.is_some() {
            self.provider.api_key = provider.api_key;
        }

        if let Some(max_turns) = agent.max_turns {
            self.agent.max_turns = max_turns;
        }

        if let Some(max_subject_length) = commit.max_subject_length {
            self.commit.max_subject_length = max_subject_length;
        }
        if let Some(include_body) = commit.include_body {
            self.commit.include_body = include_body;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(ENV_PROVIDER) {
            match val.parse::<ProviderName>() {
                Ok(name) => self.provider.name = name,
                Err(_) => warn!("ignoring invalid {ENV_PROVIDER} value: {val}"),
            }
        }
        if let Some(val) = env.non_empty(ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.non_empty(ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }
        if let Some(val) = env.non_empty(ENV_MAX_TURNS) {
            match val.parse::<usize>() {
                Ok(turns) if turns > 0 => self.agent.max_turns = turns,
                _ => warn!("ignoring invalid {ENV_MAX_TURNS} value: {val}"),
            }
        }

        let api_key = env.first_non_empty(&[ENV_API_KEY, self.provider.name.api_key_env_var()]);
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }
    }
}
