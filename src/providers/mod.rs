//! ReviewProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! codebase from the specific LLM library.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the review provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for an LLM that can drive the repository tools.
///
/// Implementations handle client construction, tool registration and the
/// multi-turn tool-calling loop, returning the model's final reply.
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Prompt the model and return its final text reply.
    ///
    /// `max_turns` bounds the number of tool round-trips.
    async fn prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_turns: usize,
    ) -> Result<String, ProviderError>;
}
