//! aic - Generate git commit messages with AI.
//!
//! # Overview
//!
//! aic collects the staged diff and recent commit subjects from the current
//! repository, sends them to a configured LLM provider, and parses the
//! model's JSON response into a list of candidate commit messages. The CLI,
//! LazyGit, and VS Code surfaces all go through the same pipeline.

pub mod config;
pub mod error;
pub mod git;
pub mod integrations;
pub mod llm;

// Re-export commonly used types
pub use config::Config;
pub use error::{
    ConfigError, GenerateError, GitError, IntegrationError, ProviderError, ResponseError,
};
pub use git::{StagedDiff, recent_commits, staged_diff};
pub use llm::client::{Provider, ProviderClient};
pub use llm::{GenerationRequest, generate_commit_messages};
