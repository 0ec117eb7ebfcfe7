//! Response documents of the GitHub Actions REST API.
//!
//! Only the fields the release flow reads are modelled; everything else in
//! the payload is ignored.

use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/actions/workflows/{workflow}/runs`
#[derive(Deserialize, Debug, Clone)]
pub struct WorkflowRunList {
    /// Total number of matching runs on the server
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Runs on this page, most recent first
    pub workflow_runs: Vec<WorkflowRun>,
}

/// A single execution of a workflow
#[derive(Deserialize, Debug, Clone)]
pub struct WorkflowRun {
    /// Run ID
    pub id: u64,
    /// API URL of this run
    pub url: String,
    /// API URL listing this run's artifacts
    pub artifacts_url: String,
    /// `queued`, `in_progress`, `completed`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Final outcome; `None` while the run is still going
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Branch or tag the run was triggered for
    #[serde(default)]
    pub head_branch: Option<String>,
    /// Browser URL of the run
    #[serde(default)]
    pub html_url: Option<String>,
}

impl WorkflowRun {
    /// Whether the run has finished, whatever the outcome
    pub fn is_complete(&self) -> bool {
        self.conclusion.is_some()
    }

    /// Whether the run finished successfully
    pub fn succeeded(&self) -> bool {
        self.conclusion.as_deref() == Some("success")
    }
}

/// `GET /repos/{owner}/{repo}/actions/runs/{run_id}/artifacts`
#[derive(Deserialize, Debug, Clone)]
pub struct ArtifactList {
    /// Total number of artifacts on the server
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Artifacts on this page
    pub artifacts: Vec<Artifact>,
}

impl ArtifactList {
    /// Find an artifact by exact name
    pub fn find(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Names of all listed artifacts
    pub fn names(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.name.clone()).collect()
    }
}

/// A zip-packaged output attached to a workflow run
#[derive(Deserialize, Debug, Clone)]
pub struct Artifact {
    /// Artifact ID
    pub id: u64,
    /// Artifact name as given in the workflow
    pub name: String,
    /// API URL that redirects to the zip archive
    pub archive_download_url: String,
    /// Compressed size
    #[serde(default)]
    pub size_in_bytes: Option<u64>,
    /// Whether the artifact has passed its retention period
    #[serde(default)]
    pub expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_without_conclusion_is_pending() {
        let run: WorkflowRun = serde_json::from_str(
            r#"{"id": 7, "url": "u", "artifacts_url": "a", "status": "in_progress",
                "conclusion": null, "extra": {"ignored": true}}"#,
        )
        .unwrap();
        assert!(!run.is_complete());
        assert!(!run.succeeded());
    }

    #[test]
    fn failed_run_is_complete() {
        let run: WorkflowRun = serde_json::from_str(
            r#"{"id": 7, "url": "u", "artifacts_url": "a", "conclusion": "failure"}"#,
        )
        .unwrap();
        assert!(run.is_complete());
        assert!(!run.succeeded());
    }

    #[test]
    fn artifacts_are_found_by_exact_name() {
        let list: ArtifactList = serde_json::from_str(
            r#"{"total_count": 2, "artifacts": [
                {"id": 1, "name": "openssl-x86_64", "archive_download_url": "d1"},
                {"id": 2, "name": "openssl-arm64", "archive_download_url": "d2", "expired": false}
            ]}"#,
        )
        .unwrap();
        assert_eq!(list.find("openssl-arm64").map(|a| a.id), Some(2));
        assert!(list.find("openssl").is_none());
        assert_eq!(list.names(), vec!["openssl-x86_64", "openssl-arm64"]);
    }
}
