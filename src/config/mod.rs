//! Config store: load / validate / save for `~/.aicommitrc`.
//!
//! The file is a small JSON object with camelCase keys
//! (`provider`, `apiKey`, `model`, `maxTokens`, `endpoint`). Every command
//! reloads it from disk; there is no in-process caching.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::llm::client::Provider;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 256;

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Persisted provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Path to the per-user config file (`~/.aicommitrc`).
pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".aicommitrc"))
        .ok_or(ConfigError::NoHomeDir)
}

impl Config {
    /// Load and validate the config from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load and validate the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound);
            }
            Err(e) => return Err(ConfigError::ReadFailed(e)),
        };

        let config: Config = serde_json::from_str(&data).map_err(ConfigError::ParseFailed)?;
        config.validated()
    }

    /// Validate invariants and normalize the endpoint.
    ///
    /// The endpoint is required for openai-compatible and cleared for every
    /// other provider, so stale endpoints never leak across provider
    /// switches.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }

        if self.provider == Provider::OpenAiCompatible {
            match &self.endpoint {
                Some(endpoint) if !endpoint.trim().is_empty() => {}
                _ => return Err(ConfigError::MissingEndpoint),
            }
        } else {
            self.endpoint = None;
        }

        Ok(self)
    }

    /// Validate and save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path()?)
    }

    /// Validate and save to an explicit path, atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let validated = self.clone().validated()?;
        let json =
            serde_json::to_string_pretty(&validated).expect("config serialization is infallible");

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(json.as_bytes())
            .map_err(ConfigError::WriteFailed)?;
        tmp.persist(path)
            .map_err(|e| ConfigError::WriteFailed(e.error))?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Pretty-printed config with the API key redacted, for `view-config`.
    pub fn redacted(&self) -> String {
        let mut masked = self.clone();
        masked.api_key = redact_key(&self.api_key);
        serde_json::to_string_pretty(&masked).expect("config serialization is infallible")
    }
}

/// Keep a short identifying prefix, mask the rest.
fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    if key.chars().count() <= 6 {
        "*".repeat(key.chars().count())
    } else {
        format!("{prefix}...")
    }
}
