//! Command line interface for artifact_release.
//!
//! Argument parsing, terminal output and command dispatch.

mod args;
pub mod commands;
mod output;
mod retry_config;

pub use args::{Args, Command, DEFAULT_API_URL, Platform, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;
pub use retry_config::RetryConfig;

use crate::config::EnvConfig;
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args, &EnvConfig::from_env()).await
}
