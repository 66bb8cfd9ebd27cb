//! Error types for aic modules using thiserror.

use thiserror::Error;

/// Errors from the config store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find configuration file. Please run `aic config` first.")]
    NotFound,

    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Invalid API key: must be a non-empty string")]
    MissingApiKey,

    #[error("Invalid model: must be a non-empty string")]
    MissingModel,

    #[error("Invalid endpoint: must be a non-empty string for openai-compatible provider")]
    MissingEndpoint,

    #[error("Invalid maxTokens: must be at least 1")]
    InvalidMaxTokens,

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository. Run aic from within a git repository.")]
    OpenRepository(#[source] git2::Error),

    #[error("No staged changes found. Stage changes with `git add` first.")]
    NoStagedChanges,

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to read commit history: {0}")]
    LogFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    SignatureMissing(#[source] git2::Error),
}

/// Errors from provider client construction and completion calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(
        "Unsupported provider: {0}. Must be one of: openai, openai-compatible, anthropic, openrouter, groq"
    )]
    UnsupportedProvider(String),

    #[error("Provider openai-compatible requires an endpoint. Run `aic config --endpoint <url>`.")]
    MissingEndpoint,

    #[error("Request to provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Provider returned an unexpected response envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("Provider returned no usable text in its completion")]
    EmptyCompletion,
}

/// Errors from parsing and validating the model's response text.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("No valid JSON found in AI response")]
    NoJsonFound,

    #[error("AI response contained malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("AI response did not match the expected schema: {0}")]
    SchemaValidation(String),
}

/// Umbrella error for the generation pipeline.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Errors from integration setup (LazyGit, VS Code).
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Failed to read LazyGit config at {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write LazyGit config at {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "VS Code CLI (`code`) not found. Install the 'code' command from VS Code's command palette first."
    )]
    CodeCliNotFound,

    #[error("`code --install-extension` failed with code {code}: {stderr}")]
    CodeCliFailed { code: i32, stderr: String },

    #[error("Failed to spawn `code`: {0}")]
    SpawnFailed(#[source] std::io::Error),
}
