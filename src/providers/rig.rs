//! rig-core integration for tool-driven repository work.
//!
//! Uses rig-core's provider clients and Agent abstraction for multi-provider
//! support. Currently supports: Anthropic, OpenAI, Gemini, Groq, and any
//! OpenAI-compatible API.
//!
//! The commit message, file changes and Markdown tools are registered with
//! every agent, so the model can inspect changes and write results through
//! rig-core's native tool calling.

use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderConfig;
use crate::models::ProviderName;
use crate::tools::Toolbox;

use super::{ProviderError, ReviewProvider};

/// Maximum number of retry attempts for transient API errors.
pub const MAX_RETRIES: u32 = 3;

/// Initial backoff delay between retries.
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(10);

/// Maximum backoff delay between retries.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Build an agent with the repository tools and prompt it.
///
/// `max_tokens` is left unset so the model keeps its full output budget for
/// tool calls and reasoning.
macro_rules! prompt_with_tools {
    ($client:expr, $model:expr, $system:expr, $user:expr, $label:expr, $toolbox:expr, $max_turns:expr) => {{
        let agent = $client
            .agent($model)
            .preamble($system)
            .temperature(0.0)
            .tool($toolbox.file_changes_tool())
            .tool($toolbox.commit_message_tool())
            .tool($toolbox.markdown_file_tool())
            .default_max_turns($max_turns)
            .build();
        agent
            .prompt($user)
            .await
            .map_err(|e| ProviderError::ApiError(format!("{} API error: {e}", $label)))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            ProviderError::ApiError(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based provider.
///
/// Wraps rig-core's multi-provider client system. The provider name
/// in config selects which rig-core provider to use.
pub struct RigProvider {
    config: ProviderConfig,
    toolbox: Toolbox,
}

impl RigProvider {
    /// Create a new RigProvider with the given configuration and tools.
    pub fn new(config: ProviderConfig, toolbox: Toolbox) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or {}.",
                config.name,
                crate::constants::ENV_API_KEY,
                config.name.api_key_env_var()
            )));
        }
        Ok(Self { config, toolbox })
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<providers::openai::CompletionsClient, ProviderError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(base_url) = base_url {
            builder = builder.base_url(base_url);
        }
        let client: providers::openai::CompletionsClient = builder
            .build()
            .map_err(|e| ProviderError::ApiError(format!("failed to create OpenAI client: {e}")))?;
        Ok(client)
    }

    /// Require `base_url` for OpenAI-compatible providers.
    fn require_base_url(&self) -> Result<&str, ProviderError> {
        self.config.base_url.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured(
                "openai-compatible provider requires base_url to be set".to_string(),
            )
        })
    }

    /// Get the API key or return an error.
    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }
}

#[async_trait]
impl ReviewProvider for RigProvider {
    async fn prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_turns: usize,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let model = self.config.model.as_str();
        let toolbox = &self.toolbox;

        tracing::debug!(provider = %self.config.name, model, max_turns, "prompting model");

        match self.config.name {
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        ProviderError::ApiError(format!("failed to create Anthropic client: {e}"))
                    })?;
                prompt_with_tools!(client, model, system_prompt, user_prompt, "Anthropic", toolbox, max_turns)
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key, self.config.base_url.as_deref())?;
                prompt_with_tools!(client, model, system_prompt, user_prompt, "OpenAI", toolbox, max_turns)
            }
            ProviderName::OpenAICompatible => {
                let base_url = self.require_base_url()?;
                let client = self.build_openai_client(api_key, Some(base_url))?;
                prompt_with_tools!(
                    client,
                    model,
                    system_prompt,
                    user_prompt,
                    "OpenAI-compatible",
                    toolbox,
                    max_turns
                )
            }
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_with_tools!(client, model, system_prompt, user_prompt, "Gemini", toolbox, max_turns)
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_with_tools!(client, model, system_prompt, user_prompt, "Groq", toolbox, max_turns)
            }
        }
    }
}

/// Check whether a provider error is transient and worth retrying.
///
/// Matches HTTP status codes commonly used for rate limiting and
/// temporary unavailability: 429 (Too Many Requests), 503 (Service
/// Unavailable), 529 (Overloaded), and connection/timeout errors.
pub fn is_retryable(err: &ProviderError) -> bool {
    classify_error(err).is_some()
}

/// Classifies a provider error into a short, user-friendly message.
///
/// Returns `Some(message)` for transient/retryable errors, `None` otherwise.
pub fn classify_error(err: &ProviderError) -> Option<&'static str> {
    match err {
        ProviderError::ApiError(msg) => {
            let msg_lower = msg.to_lowercase();
            if msg_lower.contains("429")
                || msg_lower.contains("rate limit")
                || msg_lower.contains("too many requests")
            {
                Some("Rate limited by API")
            } else if msg_lower.contains("503")
                || msg_lower.contains("service unavailable")
                || msg_lower.contains("high demand")
            {
                Some("High model load")
            } else if msg_lower.contains("529") || msg_lower.contains("overloaded") {
                Some("API overloaded")
            } else if msg_lower.contains("502") {
                Some("API gateway error")
            } else if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
                Some("Request timed out")
            } else if msg_lower.contains("connection") {
                Some("Connection error")
            } else if msg_lower.contains("temporarily") || msg_lower.contains("try again") {
                Some("Temporary API error")
            } else {
                None
            }
        }
        ProviderError::NotConfigured(_) => None,
    }
}

/// Compute the backoff duration for a retry attempt using exponential backoff.
pub fn retry_backoff(attempt: u32) -> Duration {
    let backoff = INITIAL_BACKOFF.saturating_mul(2u32.saturating_pow(attempt));
    backoff.min(MAX_BACKOFF)
}
