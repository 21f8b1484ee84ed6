//! Runs a tool-assisted review against a provider, retrying transient
//! API failures with exponential backoff.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::prompt;
use crate::providers::rig::{MAX_RETRIES, classify_error, is_retryable, retry_backoff};
use crate::providers::{ProviderError, ReviewProvider};

/// A single review run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub root: PathBuf,
    /// Task for the model; a default review task when absent.
    pub instructions: Option<String>,
    pub max_turns: usize,
}

/// Prompt `provider` for `request` and return the model's reply.
pub async fn run_review(
    provider: &dyn ReviewProvider,
    request: &ReviewRequest,
) -> Result<String, ProviderError> {
    run_review_with_backoff(provider, request, retry_backoff).await
}

/// [`run_review`] with a custom backoff schedule.
pub async fn run_review_with_backoff(
    provider: &dyn ReviewProvider,
    request: &ReviewRequest,
    backoff: impl Fn(u32) -> Duration,
) -> Result<String, ProviderError> {
    let system = prompt::system_prompt();
    let user = prompt::review_request(&request.root, request.instructions.as_deref());

    let mut attempt = 0;
    loop {
        match provider.prompt(&system, &user, request.max_turns).await {
            Ok(reply) => {
                info!(attempts = attempt + 1, "review finished");
                return Ok(reply);
            }
            Err(ref e) if is_retryable(e) && attempt < MAX_RETRIES => {
                let delay = backoff(attempt);
                warn!(
                    attempt = attempt + 1,
                    max = MAX_RETRIES + 1,
                    reason = classify_error(e).unwrap_or("Transient error"),
                    backoff_secs = delay.as_secs(),
                    error = %e,
                    "retrying model call"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
