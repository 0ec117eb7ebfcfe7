//! Minimal GitHub Actions REST client with bounded retry of transient failures.

use crate::cli::RetryConfig;
use crate::error::{CliError, GitHubError, ReleaseError, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::models::{Artifact, ArtifactList, WorkflowRun, WorkflowRunList};

/// Per-request timeout; polling loops are bounded separately
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the subset of the Actions API used by the release flow
#[derive(Debug, Clone)]
pub struct ActionsClient {
    http: reqwest::Client,
    api_base: Url,
    auth: HeaderValue,
    retry: RetryConfig,
}

impl ActionsClient {
    /// Create a client against `api_base` (e.g. `https://api.github.com`)
    pub fn new(api_base: &str, token: &str, retry: RetryConfig) -> Result<Self> {
        let api_base = Url::parse(api_base)?;

        let mut auth = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: "GitHub token contains characters not allowed in a header".to_string(),
            })
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("artifact_release/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_base,
            auth,
            retry,
        })
    }

    /// Retry settings this client was built with
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// URL listing the runs of `workflow`, narrowed by query `filters`
    pub fn workflow_runs_url(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        filters: &[(&str, &str)],
    ) -> Result<Url> {
        let base = self.api_base.as_str().trim_end_matches('/');
        let path = format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            base, owner, repo, workflow
        );
        Ok(Url::parse_with_params(&path, filters)?)
    }

    /// Single GET, reading the full body so truncated transfers surface here.
    async fn fetch(&self, url: &str) -> reqwest::Result<(StatusCode, Vec<u8>)> {
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    /// GET `url`, retrying transport hiccups and non-200 answers.
    ///
    /// Up to `api_attempts` tries are retried after `api_retry_delay`; one
    /// last attempt follows whose failure is returned to the caller.
    pub async fn get_with_retry(&self, url: &str) -> Result<Vec<u8>> {
        for attempt in 1..=self.retry.api_attempts {
            match self.fetch(url).await {
                Ok((status, body)) if status == StatusCode::OK => return Ok(body),
                Ok((status, _)) => {
                    log::warn!(
                        "HTTP error ({}) fetching {}, retrying (attempt {}/{})",
                        status.as_u16(),
                        url,
                        attempt,
                        self.retry.api_attempts
                    );
                }
                Err(e) if is_transient(&e) => {
                    log::warn!("Exception ({}) fetching {}, retrying", e, url);
                }
                Err(e) => return Err(e.into()),
            }
            tokio::time::sleep(self.retry.api_retry_delay).await;
        }

        let (status, body) = self.fetch(url).await?;
        if status != StatusCode::OK {
            return Err(GitHubError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }
        Ok(body)
    }

    /// GET `url` with retry and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);
        let body = self.get_with_retry(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// List workflow runs at a URL built by [`Self::workflow_runs_url`]
    pub async fn list_workflow_runs(&self, url: &str) -> Result<WorkflowRunList> {
        self.get_json(url).await
    }

    /// Fetch a single run by its API URL
    pub async fn get_run(&self, run_url: &str) -> Result<WorkflowRun> {
        self.get_json(run_url).await
    }

    /// List the artifacts of a run by its `artifacts_url`
    pub async fn list_artifacts(&self, artifacts_url: &str) -> Result<ArtifactList> {
        self.get_json(artifacts_url).await
    }

    /// Download an artifact's zip archive
    pub async fn download_archive(&self, artifact: &Artifact) -> Result<Vec<u8>> {
        log::info!(
            "Downloading artifact '{}' ({} bytes)",
            artifact.name,
            artifact.size_in_bytes.unwrap_or(0)
        );
        self.get_with_retry(&artifact.archive_download_url).await
    }
}

/// Transport failures worth another attempt
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect()
        || error.is_timeout()
        || error.is_request()
        || error.is_body()
        || error.is_decode()
}
