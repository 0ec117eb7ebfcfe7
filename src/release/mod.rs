//! The release flow: tag, wait for the wheel builder, collect packages, upload.

use crate::archive::PackageDir;
use crate::cli::RuntimeConfig;
use crate::error::{GitHubError, Result};
use crate::git;
use crate::github::{self, ActionsClient, WorkflowRun};
use crate::process::CommandRunner;
use crate::publish;
use std::path::PathBuf;

/// Configuration for a release
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Version being released; also the tag name
    pub version: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Workflow file that builds the packages
    pub workflow: String,
    /// Directory packages are extracted into
    pub dist_dir: PathBuf,
    /// File suffixes that identify packages inside artifacts
    pub suffixes: Vec<String>,
    /// Upload tool invoked as `<tool> upload <files>`
    pub upload_tool: String,
    /// Skip creating and pushing the tag
    pub skip_tag: bool,
    /// Skip the upload step
    pub skip_upload: bool,
}

impl ReleaseConfig {
    /// Defaults for releasing `version` of pyca/cryptography
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            owner: "pyca".to_string(),
            repo: "cryptography".to_string(),
            workflow: "wheel-builder.yml".to_string(),
            dist_dir: PathBuf::from("dist"),
            suffixes: vec![".whl".to_string(), ".tar.gz".to_string()],
            upload_tool: "twine".to_string(),
            skip_tag: false,
            skip_upload: false,
        }
    }

    /// Link for creating a token scoped to this release
    pub fn token_url(&self) -> String {
        format!(
            "https://github.com/settings/tokens/new?description={}&scopes=repo",
            self.version
        )
    }
}

/// Result of a release
#[derive(Debug, Clone)]
pub struct ReleaseResult {
    /// The workflow run the packages came from
    pub run: WorkflowRun,
    /// Extracted package files, in download order
    pub packages: Vec<PathBuf>,
    /// Whether the packages were handed to the upload tool
    pub uploaded: bool,
}

/// Run the full release
pub async fn perform_release<R: CommandRunner>(
    release: &ReleaseConfig,
    client: &ActionsClient,
    runner: &R,
    config: &RuntimeConfig,
) -> Result<ReleaseResult> {
    if release.skip_tag {
        config.verbose_println("Skipping tag creation");
    } else {
        config.section("Tagging");
        git::tag_release(runner, &release.version).await?;
        git::push_tags(runner).await?;
    }

    tokio::fs::create_dir_all(&release.dist_dir).await?;

    config.section("Waiting for CI");
    let runs_url = client.workflow_runs_url(
        &release.owner,
        &release.repo,
        &release.workflow,
        &[("event", "push"), ("branch", release.version.as_str())],
    )?;
    config.progress_println(&format!(
        "Waiting for {} to start for {}...",
        release.workflow, release.version
    ));
    let run = github::wait_for_workflow_run(client, runs_url.as_str()).await?;
    if let Some(html_url) = &run.html_url {
        config.indent(html_url);
    }

    config.progress_println(&format!("Waiting for run {} to complete...", run.id));
    let run = github::wait_for_completion(client, &run.url).await?;
    if !run.succeeded() {
        config.warning_println(&format!(
            "Run {} concluded '{}'; collecting whatever artifacts it produced",
            run.id,
            run.conclusion.as_deref().unwrap_or_default()
        ));
    }

    config.section("Downloading artifacts");
    let packages = download_packages(release, client, &run, config).await?;
    if packages.is_empty() {
        return Err(GitHubError::NoPackagesFound {
            suffixes: release.suffixes.clone(),
        }
        .into());
    }
    config.success_println(&format!(
        "{} package(s) in {}",
        packages.len(),
        release.dist_dir.display()
    ));

    if release.skip_upload {
        config.verbose_println("Skipping upload");
        return Ok(ReleaseResult {
            run,
            packages,
            uploaded: false,
        });
    }

    config.section("Uploading");
    publish::upload_packages(runner, &release.upload_tool, &packages).await?;
    config.success_println(&format!("Released {}", release.version));

    Ok(ReleaseResult {
        run,
        packages,
        uploaded: true,
    })
}

/// Download every artifact of `run` and extract its packages into the dist dir
async fn download_packages(
    release: &ReleaseConfig,
    client: &ActionsClient,
    run: &WorkflowRun,
    config: &RuntimeConfig,
) -> Result<Vec<PathBuf>> {
    let artifacts = client.list_artifacts(&run.artifacts_url).await?;
    let mut dist = PackageDir::new(&release.dist_dir);
    let mut paths = Vec::new();

    for artifact in &artifacts.artifacts {
        if artifact.expired {
            config.warning_println(&format!("Artifact '{}' has expired, skipping", artifact.name));
            continue;
        }

        let data = client.download_archive(artifact).await?;
        let extracted = dist.extract(&data, &release.suffixes).await?;
        for path in &extracted {
            config.indent(&format!(
                "✓ {}",
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("<unknown>")
            ));
        }
        paths.extend(extracted);
    }

    Ok(paths)
}
