//! Command execution functions.
//!
//! Invalid arguments are reported here and map to exit code 1. Command
//! failures propagate to the binary, which prints them with recovery
//! suggestions.

mod download;
mod helpers;
mod release;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::EnvConfig;
use crate::error::Result;

use download::execute_download;
use release::execute_release;

/// Execute the command in `args` against the given environment
pub async fn execute_command(args: Args, env_config: &EnvConfig) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    log::debug!("Running '{}'", args.command.name());
    match &args.command {
        Command::Release { .. } => execute_release(&args, &config, env_config).await,
        Command::Download { .. } => execute_download(&args, &config, env_config).await,
    }
}
