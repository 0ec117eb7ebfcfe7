//! Subprocess execution for the external tools a release drives.
//!
//! Git and the package upload tool are invoked through [`CommandRunner`] so
//! that the release flow can be exercised without touching a real repository.

use crate::cli::RuntimeConfig;
use crate::error::{CliError, ReleaseError, Result};
use std::future::Future;
use std::sync::Mutex;

/// Runs external programs to completion
pub trait CommandRunner {
    /// Run `program` with `args`, failing on a non-zero exit status
    fn run(&self, program: &str, args: &[String]) -> impl Future<Output = Result<()>>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    config: RuntimeConfig,
}

impl SystemCommandRunner {
    /// Create a runner that echoes each command through `config`
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }
}

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<()> {
        self.config.running(program, args);
        log::debug!("spawning {} {:?}", program, args);

        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| {
                ReleaseError::Cli(CliError::ExecutionFailed {
                    command: command_line(program, args),
                    reason: e.to_string(),
                })
            })?;

        if !status.success() {
            return Err(ReleaseError::Cli(CliError::ExecutionFailed {
                command: command_line(program, args),
                reason: format!("exited with {}", status),
            }));
        }
        Ok(())
    }
}

/// Records invocations instead of running them
///
/// Optionally fails the first command whose program matches `fail_program`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    fail_program: Option<String>,
}

impl RecordingRunner {
    /// Runner that accepts every command
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that fails when `program` is invoked
    pub fn failing_on(program: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_program: Some(program.to_string()),
        }
    }

    /// Every recorded invocation as `[program, args...]`
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<()> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        if self.fail_program.as_deref() == Some(program) {
            return Err(ReleaseError::Cli(CliError::ExecutionFailed {
                command: command_line(program, args),
                reason: "exited with exit status: 1".to_string(),
            }));
        }
        Ok(())
    }
}

/// Check that each program resolves on `PATH` before any side effect happens
pub fn require_tools(tools: &[&str]) -> Result<()> {
    for tool in tools {
        which::which(tool).map_err(|_| CliError::ToolNotFound {
            tool: tool.to_string(),
        })?;
    }
    Ok(())
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
