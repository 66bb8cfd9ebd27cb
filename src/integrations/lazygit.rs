//! LazyGit integration: wire `aic generate` into a custom command.
//!
//! The integration is a fixed `customCommands` block appended to the LazyGit
//! config file. Patching is text-level on purpose: the block is constant,
//! and round-tripping a user's whole config through a YAML parser would
//! reorder keys and drop comments.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IntegrationError;

/// Marker used to detect an existing installation.
const COMMAND_MARKER: &str = "aic generate";

/// The custom-command block. Ctrl-G in the files context runs
/// `aic generate`, presents the numbered candidates as a menu, and commits
/// the selected message.
pub const LAZYGIT_SNIPPET: &str = r#"customCommands:
  - key: <c-g>
    command: git commit -m "{{.Form.Msg}}"
    context: files
    description: Generate commit message with AI
    prompts:
      - type: menuFromCommand
        title: AI Commit
        key: Msg
        command: aic generate
        valueFormat: "{{ .message }}"
        labelFormat: "{{ .number }}: {{ .message | blue }}"
        filter: "^(?P<number>\\d+)\\.\\s(?P<message>.+)$"
"#;

/// Result of a LazyGit setup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The block was appended to the config file.
    Installed,
    /// The config already invokes `aic generate`; nothing was changed.
    AlreadyInstalled,
    /// The config defines its own `customCommands` section; appending a
    /// second one would produce invalid YAML, so the user must merge the
    /// entry by hand.
    ManualMergeNeeded,
}

/// Default LazyGit config file location (`~/.config/lazygit/config.yml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("lazygit").join("config.yml"))
}

/// Install the custom command into the LazyGit config at `path`.
///
/// Creates the file when missing. Idempotent: an existing `aic generate`
/// command is left untouched.
pub fn setup_lazygit(path: &Path) -> Result<SetupOutcome, IntegrationError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(IntegrationError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    if existing.contains(COMMAND_MARKER) {
        debug!(path = %path.display(), "LazyGit config already integrated");
        return Ok(SetupOutcome::AlreadyInstalled);
    }

    if existing.contains("customCommands:") {
        return Ok(SetupOutcome::ManualMergeNeeded);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(LAZYGIT_SNIPPET);

    write_atomic(path, &updated)?;
    debug!(path = %path.display(), "LazyGit integration installed");
    Ok(SetupOutcome::Installed)
}

fn write_atomic(path: &Path, content: &str) -> Result<(), IntegrationError> {
    let wrap = |source: std::io::Error| IntegrationError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(content.as_bytes()).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_creates_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let outcome = setup_lazygit(&path).unwrap();
        assert_eq!(outcome, SetupOutcome::Installed);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("customCommands:"));
        assert!(content.contains("aic generate"));
    }

    #[test]
    fn test_setup_appends_after_existing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "gui:\n  theme:\n    lightTheme: false\n").unwrap();

        let outcome = setup_lazygit(&path).unwrap();
        assert_eq!(outcome, SetupOutcome::Installed);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("gui:"));
        assert!(content.contains("\ncustomCommands:"));
    }

    #[test]
    fn test_setup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        assert_eq!(setup_lazygit(&path).unwrap(), SetupOutcome::Installed);
        let after_first = std::fs::read_to_string(&path).unwrap();

        assert_eq!(setup_lazygit(&path).unwrap(), SetupOutcome::AlreadyInstalled);
        let after_second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_setup_defers_to_existing_custom_commands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "customCommands:\n  - key: <c-x>\n    command: echo hi\n")
            .unwrap();

        let outcome = setup_lazygit(&path).unwrap();
        assert_eq!(outcome, SetupOutcome::ManualMergeNeeded);

        // Untouched
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("aic generate"));
    }

    #[test]
    fn test_snippet_filter_matches_numbered_output() {
        // The generate command prints "1. message" lines; the snippet's
        // filter must capture both groups from that shape.
        assert!(LAZYGIT_SNIPPET.contains(r"^(?P<number>\\d+)\\.\\s(?P<message>.+)$"));
    }
}
