//! Provider tag, client factory, and completion invoker.
//!
//! Providers are abstracted by an explicit tag carried alongside the HTTP
//! handle. Every call site dispatches on the tag, never on the shape of the
//! client object, since the OpenAI-compatible family shares one wire format
//! across several vendors.

use std::fmt;
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic requires a pinned API version header on every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openai-compatible")]
    OpenAiCompatible,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "groq")]
    Groq,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::OpenAiCompatible,
        Provider::Anthropic,
        Provider::OpenRouter,
        Provider::Groq,
    ];

    /// The wire/config tag for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenAiCompatible => "openai-compatible",
            Provider::Anthropic => "anthropic",
            Provider::OpenRouter => "openrouter",
            Provider::Groq => "groq",
        }
    }

    /// Human-readable name for interactive menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::OpenAiCompatible => "Other (OpenAI compatible)",
            Provider::Anthropic => "Anthropic",
            Provider::OpenRouter => "OpenRouter",
            Provider::Groq => "Groq",
        }
    }

    /// Whether the response envelope is Anthropic-shaped rather than
    /// OpenAI-shaped.
    fn anthropic_shaped(&self) -> bool {
        matches!(self, Provider::Anthropic)
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "openai-compatible" => Ok(Provider::OpenAiCompatible),
            "anthropic" => Ok(Provider::Anthropic),
            "openrouter" => Ok(Provider::OpenRouter),
            "groq" => Ok(Provider::Groq),
            other => Err(ProviderError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Request body shared by both wire formats.
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [ChatMessage],
}

/// OpenAI-shaped response envelope: text at `choices[0].message.content`.
#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Anthropic-shaped response envelope: text in the first content block,
/// usable only when that block's type tag is "text".
#[derive(Debug, Deserialize)]
struct AnthropicEnvelope {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// A provider-bound chat-completion client.
///
/// Construction only configures the transport; no network call happens until
/// [`ProviderClient::complete`].
#[derive(Debug)]
pub struct ProviderClient {
    provider: Provider,
    base_url: String,
    api_key: String,
    http: Client,
}

impl ProviderClient {
    /// Build a client for the given provider.
    ///
    /// `endpoint` becomes the transport's base URL when `provider` is
    /// openai-compatible (and is required there); all other providers ignore
    /// it and use their fixed default.
    pub fn new(
        provider: Provider,
        api_key: impl Into<String>,
        endpoint: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let base_url = match provider {
            Provider::OpenAi => OPENAI_BASE_URL.to_string(),
            Provider::OpenRouter => OPENROUTER_BASE_URL.to_string(),
            Provider::Groq => GROQ_BASE_URL.to_string(),
            Provider::Anthropic => ANTHROPIC_BASE_URL.to_string(),
            Provider::OpenAiCompatible => endpoint
                .map(str::to_string)
                .ok_or(ProviderError::MissingEndpoint)?,
        };

        Ok(Self {
            provider,
            base_url,
            api_key: api_key.into(),
            http: Client::new(),
        })
    }

    /// Build a client from a raw provider tag, as read from config or flags.
    ///
    /// Fails with [`ProviderError::UnsupportedProvider`] for an unknown tag,
    /// before any transport is configured.
    pub fn from_tag(
        tag: &str,
        api_key: impl Into<String>,
        endpoint: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let provider = tag.parse::<Provider>()?;
        Self::new(provider, api_key, endpoint)
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send the messages to the provider and return the raw completion text.
    ///
    /// One POST, no retry. Network/auth failures wrap the reqwest cause;
    /// non-success statuses carry the provider's response body.
    pub async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        messages: &[ChatMessage],
    ) -> Result<String, ProviderError> {
        let base = self.base_url.trim_end_matches('/');
        let url = if self.provider.anthropic_shaped() {
            format!("{base}/messages")
        } else {
            format!("{base}/chat/completions")
        };

        debug!(provider = %self.provider, %url, %model, "Sending completion request");

        let body = CompletionBody {
            model,
            max_tokens,
            messages,
        };

        let request = if self.provider.anthropic_shaped() {
            self.http
                .post(&url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
        } else {
            self.http.post(&url).bearer_auth(&self.api_key)
        };

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ProviderError::Transport)?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_content(self.provider, &text)
    }
}

/// Pull the completion text out of a provider response body.
///
/// Kept as a pure function so both envelope variants are testable without a
/// live transport.
fn extract_content(provider: Provider, body: &str) -> Result<String, ProviderError> {
    if provider.anthropic_shaped() {
        let envelope: AnthropicEnvelope =
            serde_json::from_str(body).map_err(ProviderError::InvalidEnvelope)?;
        match envelope.content.into_iter().next() {
            Some(block) if block.kind == "text" => Ok(block.text),
            _ => Err(ProviderError::EmptyCompletion),
        }
    } else {
        let envelope: ChatCompletionEnvelope =
            serde_json::from_str(body).map_err(ProviderError::InvalidEnvelope)?;
        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyCompletion)
    }
}
