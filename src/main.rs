//! aic - CLI entry point.

use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use dialoguer::{Confirm, Input, Password, Select};
use git2::Repository;
use tracing_subscriber::EnvFilter;

use aic::config::{Config, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use aic::error::ConfigError;
use aic::git;
use aic::integrations::{self, SetupOutcome};
use aic::llm::{GenerationRequest, Provider, ProviderClient, generate_commit_messages};

/// Generate git commit messages with AI.
#[derive(Parser, Debug)]
#[command(name = "aic")]
#[command(about = "Generate git commit messages with AI using your preferred model and provider")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate between 1-10 commit messages based on your current staged changes
    Generate {
        /// The number of commit messages to generate (1-10)
        #[arg(
            short,
            long,
            default_value_t = 5,
            value_parser = clap::value_parser!(u8).range(1..=10)
        )]
        amount: u8,
    },

    /// Configure your AI provider and model
    Config {
        /// The AI provider to use
        #[arg(short, long)]
        provider: Option<Provider>,

        /// The AI model to use (gpt-4, gpt-3.5, etc.)
        #[arg(short, long)]
        model: Option<String>,

        /// The API key to use for the AI provider
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// The provider's endpoint to use, if you selected openai-compatible
        #[arg(short, long)]
        endpoint: Option<String>,

        /// The maximum number of tokens to generate
        #[arg(long = "tokens")]
        tokens: Option<u32>,
    },

    /// View your current configuration
    ViewConfig,

    /// Set up integrations with LazyGit or VS Code
    Integrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so stdout stays machine-consumable (LazyGit parses it).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_default().await,
        Some(Command::Generate { amount }) => run_generate(amount).await,
        Some(Command::Config {
            provider,
            model,
            api_key,
            endpoint,
            tokens,
        }) => run_config(provider, model, api_key, endpoint, tokens),
        Some(Command::ViewConfig) => run_view_config(),
        Some(Command::Integrate) => run_integrate().await,
    }
}

/// Bare `aic`: first-run setup when no config exists, help otherwise.
async fn run_default() -> Result<()> {
    match Config::load() {
        Err(ConfigError::NotFound) => {
            println!("Welcome to AI Commit! Let's set up your configuration.");
            let config = prompt_for_config()?;
            config.save()?;
            println!("Configuration saved successfully!");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to load configuration"),
        Ok(_) => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_generate(amount: u8) -> Result<()> {
    let config = Config::load()?;

    // Construction only configures the transport; no network call yet.
    let client = ProviderClient::new(config.provider, &config.api_key, config.endpoint.as_deref())?;

    let repo = git::open_repo()?;

    // Fails before any provider call when nothing is staged.
    let diff = git::staged_diff(&repo)?;
    let recent_commits = git::recent_commits(&repo, git::RECENT_COMMIT_COUNT)?;

    let request = GenerationRequest {
        model: config.model,
        max_tokens: config.max_tokens,
        amount,
        diff: diff.text,
        recent_commits,
    };

    let messages = generate_commit_messages(&client, &request).await?;

    if messages.is_empty() {
        bail!("No commit messages returned from the provider.");
    }

    present_messages(&repo, &messages)
}

/// Show the candidates. On a terminal, offer selection and an optional
/// commit; otherwise print numbered lines for LazyGit to parse.
fn present_messages(repo: &Repository, messages: &[String]) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        for (idx, message) in messages.iter().enumerate() {
            println!("{}. {}", idx + 1, message);
        }
        return Ok(());
    }

    let selection = Select::new()
        .with_prompt("Pick a commit message")
        .items(messages)
        .default(0)
        .interact_opt()?;

    let Some(idx) = selection else {
        // Cancelled; just show what was generated.
        for (idx, message) in messages.iter().enumerate() {
            println!("{}. {}", idx + 1, message);
        }
        return Ok(());
    };

    let message = strip_numbering(&messages[idx]);

    let commit = Confirm::new()
        .with_prompt(format!("Commit staged changes with \"{message}\"?"))
        .default(true)
        .interact()?;

    if commit {
        let oid = git::commit_staged(repo, message)?;
        let short: String = oid.to_string().chars().take(7).collect();
        println!("✓ Created commit {short}");
    } else {
        println!("{message}");
    }

    Ok(())
}

/// Strip a leading "N. " numbering prefix some models add despite the
/// prompt. Presentation-side cleanup only; the pipeline returns messages
/// untouched.
fn strip_numbering(message: &str) -> &str {
    let trimmed = message.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = trimmed[digits..].strip_prefix('.')
    {
        return rest.trim_start();
    }
    message
}

fn run_config(
    provider: Option<Provider>,
    model: Option<String>,
    api_key: Option<String>,
    endpoint: Option<String>,
    tokens: Option<u32>,
) -> Result<()> {
    let no_flags = provider.is_none()
        && model.is_none()
        && api_key.is_none()
        && endpoint.is_none()
        && tokens.is_none();

    let config = if no_flags {
        println!("Welcome to AI Commit! Let's set up your configuration.");
        prompt_for_config()?
    } else {
        // Merge flags over the existing config, then re-validate.
        let existing = match Config::load() {
            Ok(config) => Some(config),
            Err(ConfigError::NotFound) => None,
            Err(e) => return Err(e).context("Failed to load existing configuration"),
        };

        Config {
            provider: provider
                .or(existing.as_ref().map(|c| c.provider))
                .unwrap_or(Provider::OpenAi),
            api_key: api_key
                .or_else(|| existing.as_ref().map(|c| c.api_key.clone()))
                .unwrap_or_default(),
            model: model
                .or_else(|| existing.as_ref().map(|c| c.model.clone()))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: tokens
                .or(existing.as_ref().map(|c| c.max_tokens))
                .unwrap_or(DEFAULT_MAX_TOKENS),
            endpoint: endpoint.or_else(|| existing.as_ref().and_then(|c| c.endpoint.clone())),
        }
    };

    config.save()?;
    println!("Configuration saved successfully!");
    Ok(())
}

fn run_view_config() -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.redacted());
    Ok(())
}

/// Interactive setup flow: provider, API key, model, endpoint when needed.
fn prompt_for_config() -> Result<Config> {
    let names: Vec<&str> = Provider::ALL.iter().map(|p| p.display_name()).collect();
    let idx = Select::new()
        .with_prompt("Select the AI provider")
        .items(&names)
        .default(0)
        .interact()?;
    let provider = Provider::ALL[idx];

    let api_key: String = Password::new()
        .with_prompt(format!("Enter your {} API key", provider.display_name()))
        .interact()?;

    let model: String = Input::new()
        .with_prompt(format!(
            "Enter the name of the {} model to use",
            provider.display_name()
        ))
        .default(DEFAULT_MODEL.to_string())
        .interact_text()?;

    let endpoint = if provider == Provider::OpenAiCompatible {
        let endpoint: String = Input::new()
            .with_prompt("Enter the OpenAI compatible provider's endpoint")
            .interact_text()?;
        Some(endpoint)
    } else {
        None
    };

    let config = Config {
        provider,
        api_key,
        model,
        max_tokens: DEFAULT_MAX_TOKENS,
        endpoint,
    }
    .validated()?;

    Ok(config)
}

async fn run_integrate() -> Result<()> {
    let choices = ["LazyGit", "VS Code"];
    let idx = Select::new()
        .with_prompt("Choose an integration to set up")
        .items(&choices)
        .default(0)
        .interact()?;

    match idx {
        0 => {
            let default_path = integrations::lazygit::default_config_path()
                .context("Could not determine home directory")?;

            let path: String = Input::new()
                .with_prompt("Path to your LazyGit config file")
                .default(default_path.display().to_string())
                .interact_text()?;

            match integrations::setup_lazygit(path.as_ref())? {
                SetupOutcome::Installed => {
                    println!("LazyGit integration set up successfully!");
                }
                SetupOutcome::AlreadyInstalled => {
                    println!("LazyGit integration is already set up.");
                }
                SetupOutcome::ManualMergeNeeded => {
                    println!(
                        "Your LazyGit config already defines customCommands. \
                         Add this entry to it manually:\n\n{}",
                        integrations::LAZYGIT_SNIPPET
                    );
                }
            }
        }
        _ => {
            integrations::setup_vscode().await?;
            println!("VS Code extension installed successfully!");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::strip_numbering;

    #[test]
    fn test_strip_numbering_removes_prefix() {
        assert_eq!(strip_numbering("1. feat: add foo"), "feat: add foo");
        assert_eq!(strip_numbering("12. fix: bar"), "fix: bar");
    }

    #[test]
    fn test_strip_numbering_leaves_plain_messages() {
        assert_eq!(strip_numbering("feat: add foo"), "feat: add foo");
    }

    #[test]
    fn test_strip_numbering_ignores_digits_without_dot() {
        assert_eq!(strip_numbering("2fa: enable codes"), "2fa: enable codes");
    }
}
