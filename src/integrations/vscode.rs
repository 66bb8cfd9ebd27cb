//! VS Code integration: install the companion extension via the `code` CLI.

use tokio::process::Command;
use tracing::debug;

use crate::error::IntegrationError;

/// Marketplace identifier of the companion extension.
pub const EXTENSION_ID: &str = "kkidd.aicommit-extension";

/// Check that the `code` CLI is on PATH.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_code_installed() -> Result<(), IntegrationError> {
    which::which("code")
        .map(|_| ())
        .map_err(|_| IntegrationError::CodeCliNotFound)
}

/// Install the extension with `code --install-extension`.
pub async fn setup_vscode() -> Result<(), IntegrationError> {
    check_code_installed()?;

    debug!(extension = EXTENSION_ID, "Installing VS Code extension");

    let output = Command::new("code")
        .arg("--install-extension")
        .arg(EXTENSION_ID)
        .output()
        .await
        .map_err(IntegrationError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(IntegrationError::CodeCliFailed { code, stderr });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_failure_maps_to_error() {
        let result = Command::new("nonexistent_command_12345").output().await;
        assert!(result.is_err());

        let error = IntegrationError::SpawnFailed(result.unwrap_err());
        assert!(matches!(error, IntegrationError::SpawnFailed(_)));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_non_zero_exit_captured_with_stderr() {
        let output = Command::new("sh")
            .arg("-c")
            .arg("echo 'install failed' >&2; exit 3")
            .output()
            .await
            .unwrap();

        assert!(!output.status.success());
        let error = IntegrationError::CodeCliFailed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("code 3"));
        assert!(message.contains("install failed"));
    }
}
