//! Fetch one named artifact from the latest successful run of a workflow.

use crate::archive;
use crate::cli::RuntimeConfig;
use crate::error::{GitHubError, Result};
use crate::github::{self, ActionsClient};
use std::path::PathBuf;

/// Configuration for an artifact download
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Workflow file whose runs are searched
    pub workflow: String,
    /// Artifact name to fetch
    pub target: String,
    /// Directory in which `<target>/` is created
    pub dest_root: PathBuf,
}

impl DownloadConfig {
    /// Directory the artifact is extracted into
    pub fn destination(&self) -> PathBuf {
        self.dest_root.join(&self.target)
    }
}

/// Download and extract the artifact; returns the directory it landed in
pub async fn perform_download(
    download: &DownloadConfig,
    client: &ActionsClient,
    config: &RuntimeConfig,
) -> Result<PathBuf> {
    config.println(&format!("Looking for: {}", download.target));

    let runs_url = client.workflow_runs_url(
        &download.owner,
        &download.repo,
        &download.workflow,
        &[("branch", "main"), ("status", "success")],
    )?;
    let run = github::latest_run_with_refetch(client, runs_url.as_str(), &download.workflow).await?;
    config.verbose_println(&format!("Using run {} of {}", run.id, download.workflow));

    let artifacts = client.list_artifacts(&run.artifacts_url).await?;
    let artifact = artifacts
        .find(&download.target)
        .ok_or_else(|| GitHubError::ArtifactNotFound {
            name: download.target.clone(),
            available: artifacts.names(),
        })?;
    config.success_println("Found artifact");

    let data = client.download_archive(artifact).await?;
    let dest = download.destination();
    let files = archive::extract_all(&data, &dest).await?;
    config.success_println(&format!("Extracted {} file(s) into {}", files, dest.display()));

    Ok(dest)
}
