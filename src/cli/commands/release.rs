//! Release command execution.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::config::EnvConfig;
use crate::error::{CliError, ReleaseError, Result};
use crate::github::ActionsClient;
use crate::process::{self, SystemCommandRunner};
use crate::release::{ReleaseConfig, perform_release};

use super::helpers::{parse_github_repo, read_token};

/// Execute release command
pub(super) async fn execute_release(
    args: &Args,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
) -> Result<i32> {
    let Command::Release {
        version,
        repo,
        workflow,
        dist_dir,
        suffixes,
        upload_tool,
        skip_tag,
        skip_upload,
        token,
    } = &args.command
    else {
        return Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: "release handler invoked for another command".to_string(),
        }));
    };

    let (owner, repo) = parse_github_repo(repo)?;
    let release = ReleaseConfig {
        version: version.clone(),
        owner,
        repo,
        workflow: workflow.clone(),
        dist_dir: dist_dir.clone(),
        suffixes: suffixes.clone(),
        upload_tool: upload_tool.clone(),
        skip_tag: *skip_tag,
        skip_upload: *skip_upload,
    };

    let mut tools = Vec::new();
    if !release.skip_tag {
        tools.push("git");
    }
    if !release.skip_upload {
        tools.push(release.upload_tool.as_str());
    }
    process::require_tools(&tools)?;

    config.println(&format!(
        "Create a new GH PAT with only actions permissions at: {}",
        release.token_url()
    ));
    let token = match token.clone().or_else(|| env_config.github_token()) {
        Some(token) => token,
        None => read_token("Github personal access token: ")?,
    };

    let retry = env_config.retry_config();
    retry.validate().map_err(|reason| {
        ReleaseError::Cli(CliError::InvalidArguments { reason })
    })?;
    let client = ActionsClient::new(&args.api_url, &token, retry)?;
    let runner = SystemCommandRunner::new(config.clone());

    let result = perform_release(&release, &client, &runner, config).await?;
    if !result.uploaded {
        config.println(&format!(
            "Packages left in {} (upload skipped)",
            release.dist_dir.display()
        ));
    }

    Ok(0)
}
