//! Download command execution.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::EnvConfig;
use crate::download::{DownloadConfig, perform_download};
use crate::error::{CliError, ReleaseError, Result};
use crate::github::ActionsClient;

use super::helpers::{default_dest_root, parse_github_repo};

/// Execute download command
pub(super) async fn execute_download(
    args: &Args,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
) -> Result<i32> {
    let Command::Download {
        platform,
        target,
        repo,
        dest,
    } = &args.command
    else {
        return Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: "download handler invoked for another command".to_string(),
        }));
    };

    let token = env_config
        .github_token()
        .ok_or(ReleaseError::Cli(CliError::MissingToken))?;

    let (owner, repo) = parse_github_repo(repo)?;
    let dest_root = match dest {
        Some(dest) => dest.clone(),
        None => default_dest_root(*platform, env_config)?,
    };
    let download = DownloadConfig {
        owner,
        repo,
        workflow: platform.workflow().to_string(),
        target: target.clone(),
        dest_root,
    };

    let retry = env_config.retry_config();
    retry.validate().map_err(|reason| {
        ReleaseError::Cli(CliError::InvalidArguments { reason })
    })?;
    let client = ActionsClient::new(&args.api_url, &token, retry)?;

    perform_download(&download, &client, config).await?;
    Ok(0)
}
