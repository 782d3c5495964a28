use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::process;

/// Clone `url` into `target_dir` with full history.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// The renderer walks the whole commit log, so the clone is never shallow.
/// `target_dir` must be absent or empty; git refuses to clone into a
/// non-empty directory and that refusal is reported as a clone error.
pub fn clone(url: &str, target_dir: &Path, timeout: Option<Duration>) -> Result<()> {
    if let Some(parent) = target_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match process::run(clone_command(url, target_dir), timeout) {
        Ok(_) => Ok(()),
        Err(Error::CommandFailed { stderr, .. }) => Err(Error::GitClone {
            url: url.to_string(),
            hint: clone_hint(&stderr),
            message: stderr,
        }),
        Err(Error::CommandSpawn { message, .. }) => Err(Error::GitClone {
            url: url.to_string(),
            message,
            hint: Some("Make sure git is installed and on PATH".to_string()),
        }),
        Err(e) => Err(e),
    }
}

/// Builds the `git clone` invocation. The URL comes from the listing API,
/// so it is placed after `--` and can never be read as an option.
fn clone_command(url: &str, target_dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--quiet", "--"])
        .arg(url)
        .arg(target_dir)
        // Never block on an interactive credential prompt.
        .env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Run `make` in `source_dir`.
pub fn make(source_dir: &Path, timeout: Option<Duration>) -> Result<()> {
    let mut cmd = Command::new("make");
    cmd.current_dir(source_dir);
    process::run(cmd, timeout)
}

/// Provide helpful guidance for common clone failures
fn clone_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository. For private repos, ensure you have:\n\
             - SSH key added to ssh-agent\n\
             - Git credentials configured\n\
             - Personal access token set up"
                .to_string(),
        )
    } else if stderr.contains("already exists and is not an empty directory") {
        Some("Two repositories may share the same name".to_string())
    } else {
        None
    }
}
