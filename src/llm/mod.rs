//! LLM generation pipeline: prompt rendering, provider invocation, and
//! response parsing.

pub mod client;
pub mod prompt;
pub mod response;

use tracing::debug;

use crate::error::GenerateError;

pub use client::{ChatMessage, Provider, ProviderClient};
pub use prompt::{PROMPT_TEMPLATE, SYSTEM_PROMPT, render_prompt};
pub use response::{extract_json_object, parse_commit_messages};

/// One generation request: built per invocation, consumed once, never
/// persisted or retried.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub max_tokens: u32,
    /// Requested message count (1-10). A hint to the model; the returned
    /// list may contain fewer or more entries.
    pub amount: u8,
    pub diff: String,
    pub recent_commits: String,
}

/// Run the full pipeline: render the prompt, invoke the provider once, and
/// extract the validated commit-message list.
///
/// The system instruction is always the first message and the rendered user
/// prompt the second; that ordering is part of the provider contract.
pub async fn generate_commit_messages(
    client: &ProviderClient,
    request: &GenerationRequest,
) -> Result<Vec<String>, GenerateError> {
    let user_prompt = render_prompt(
        PROMPT_TEMPLATE,
        request.amount,
        &request.diff,
        &request.recent_commits,
    );

    debug!(
        provider = %client.provider(),
        model = %request.model,
        amount = request.amount,
        prompt_len = user_prompt.len(),
        "Generating commit messages"
    );

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_prompt),
    ];

    let raw = client
        .complete(&request.model, request.max_tokens, &messages)
        .await?;

    debug!(raw_len = raw.len(), "Received completion");

    let commit_messages = parse_commit_messages(&raw)?;
    Ok(commit_messages)
}
