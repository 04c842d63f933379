//! External command execution seam
//!
//! Everything this crate does against the outside world goes through a
//! single primitive: run a command, capture its exit status and output.
//! The [`CommandRunner`] trait isolates that primitive so session logic
//! can be driven by a scripted runner in tests.

use std::process::Stdio;

use tokio::process::Command;

use avdctl_core::prelude::*;

/// Captured result of a completed external command.
///
/// Output is raw passthrough, lossily decoded. Never persisted beyond the
/// call that produced it.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Handle to a detached long-running process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessHandle {
    /// OS process id, when the platform reports one
    pub pid: Option<u32>,
}

/// External command execution facility
///
/// Implementors must not interpret or transform output beyond raw capture.
#[trait_variant::make(CommandRunner: Send)]
pub trait LocalCommandRunner {
    /// Run a short-lived command to completion and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Spawn a long-running process and return without waiting for it.
    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<ProcessHandle>;
}

/// Production runner backed by `tokio::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program)
                } else {
                    Error::bridge(format!("Failed to run {}: {}", program, e))
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!("{} exited with {:?}", program, output.status.code());
        if !stderr.is_empty() {
            debug!("{} stderr: {}", program, stderr.trim_end());
        }

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout,
            stderr,
        })
    }

    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<ProcessHandle> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program)
                } else {
                    Error::spawn(e.to_string())
                }
            })?;

        let pid = child.id();
        info!("Spawned {} with PID: {:?}", program, pid);

        // Reap the child in the background so it never zombifies; the
        // process itself keeps running independently.
        tokio::spawn(async move {
            let _ = child.wait().await;
        });

        Ok(ProcessHandle { pid })
    }
}
