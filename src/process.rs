//! # External Command Execution
//!
//! Every external tool the build depends on (`git`, `make`, `stagit`,
//! `stagit-index`) is run through this module. Commands block the caller
//! until they finish, but unlike `Command::output` they run under an optional
//! deadline: when it expires the child is killed and `Error::Timeout` is
//! returned.
//!
//! Each call drives the child on a single-threaded tokio runtime. The
//! deadline covers the exit of the child *and* the end of its output
//! streams, so a background process that inherited a pipe cannot hold the
//! build past the deadline.

use crate::error::{Error, Result};
use log::debug;
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Renders a command as a shell-like string for logs and error messages.
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Runs `cmd` to completion, capturing both output streams.
///
/// A non-zero exit status is an error carrying the captured stderr.
pub fn run(cmd: Command, timeout: Option<Duration>) -> Result<()> {
    run_with_stdout(cmd, Stdio::piped(), timeout)
}

/// Runs `cmd` with its stdout connected to `stdout`.
///
/// Pass `Stdio::piped()` to capture it, or a `File` converted into `Stdio`
/// to redirect it.
pub fn run_with_stdout(mut cmd: Command, stdout: Stdio, timeout: Option<Duration>) -> Result<()> {
    let description = describe(&cmd);
    debug!("Running: {}", description);

    cmd.stdin(Stdio::null()).stdout(stdout).stderr(Stdio::piped());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(supervise(
        tokio::process::Command::from(cmd),
        description,
        timeout,
    ))
}

async fn supervise(
    mut cmd: tokio::process::Command,
    description: String,
    timeout: Option<Duration>,
) -> Result<()> {
    let mut child = cmd
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::CommandSpawn {
            command: description.clone(),
            message: e.to_string(),
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let completion = async {
        let (status, stdout, stderr) =
            tokio::join!(child.wait(), read_stream(stdout), read_stream(stderr));
        status.map(|status| (status, stdout, stderr))
    };

    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, completion).await.ok(),
        None => Some(completion.await),
    };
    let Some(result) = outcome else {
        // Reaps the direct child; anything it left running is orphaned.
        let _ = child.kill().await;
        return Err(Error::Timeout {
            command: description,
            timeout: timeout.unwrap_or_default(),
        });
    };
    let (status, stdout, stderr) = result?;

    if !status.success() {
        return Err(Error::CommandFailed {
            command: description,
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    for (stream, bytes) in [("stdout", &stdout), ("stderr", &stderr)] {
        if !bytes.is_empty() {
            debug!(
                "{} {}: {}",
                description,
                stream,
                String::from_utf8_lossy(bytes).trim_end()
            );
        }
    }
    Ok(())
}

async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> Vec<u8> {
    let mut buffer = Vec::new();
    if let Some(mut stream) = stream {
        // A read error only truncates diagnostics.
        let _ = stream.read_to_end(&mut buffer).await;
    }
    buffer
}
