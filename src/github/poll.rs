//! Polling loops over workflow runs.
//!
//! Both loops sleep `poll_interval` between polls and are unbounded unless
//! `max_polls` is set in the client's [`RetryConfig`](crate::cli::RetryConfig).

use crate::error::{GitHubError, Result};

use super::client::ActionsClient;
use super::models::WorkflowRun;

/// Poll `runs_url` until at least one run is listed; returns the most recent.
///
/// Pushing a tag and the workflow run appearing in the API are not
/// synchronous, so an empty list right after the push is expected.
pub async fn wait_for_workflow_run(client: &ActionsClient, runs_url: &str) -> Result<WorkflowRun> {
    let retry = client.retry();
    let mut polls = 0u32;

    loop {
        polls += 1;
        let list = client.list_workflow_runs(runs_url).await?;
        if let Some(run) = list.workflow_runs.into_iter().next() {
            log::info!(
                "Found workflow run {} on {} after {} poll(s)",
                run.id,
                run.head_branch.as_deref().unwrap_or("unknown branch"),
                polls
            );
            return Ok(run);
        }

        if retry.max_polls.is_some_and(|max| polls >= max) {
            return Err(GitHubError::PollExhausted {
                what: format!("a workflow run at {}", runs_url),
                polls,
            }
            .into());
        }

        log::debug!("No workflow run yet at {}, polling again", runs_url);
        tokio::time::sleep(retry.poll_interval).await;
    }
}

/// Poll a run until it has a conclusion; returns the finished run.
pub async fn wait_for_completion(client: &ActionsClient, run_url: &str) -> Result<WorkflowRun> {
    let retry = client.retry();
    let mut polls = 0u32;

    loop {
        polls += 1;
        let run = client.get_run(run_url).await?;
        if run.is_complete() {
            log::info!(
                "Workflow run {} concluded '{}' after {} poll(s)",
                run.id,
                run.conclusion.as_deref().unwrap_or_default(),
                polls
            );
            return Ok(run);
        }

        if retry.max_polls.is_some_and(|max| polls >= max) {
            return Err(GitHubError::PollExhausted {
                what: format!("workflow run {} to complete", run.id),
                polls,
            }
            .into());
        }

        log::debug!(
            "Workflow run {} is {}, polling again",
            run.id,
            run.status.as_deref().unwrap_or("pending")
        );
        tokio::time::sleep(retry.poll_interval).await;
    }
}

/// Fetch runs at `runs_url`, re-fetching once if the first answer is empty.
///
/// The API occasionally returns an empty page for a workflow that does have
/// runs; a second request usually succeeds.
pub async fn latest_run_with_refetch(
    client: &ActionsClient,
    runs_url: &str,
    workflow: &str,
) -> Result<WorkflowRun> {
    let list = client.list_workflow_runs(runs_url).await?;
    let list = if list.workflow_runs.is_empty() {
        log::warn!(
            "`workflow_runs` is empty for {} (total_count: {:?}), retrying",
            runs_url,
            list.total_count
        );
        client.list_workflow_runs(runs_url).await?
    } else {
        list
    };

    list.workflow_runs.into_iter().next().ok_or_else(|| {
        GitHubError::NoWorkflowRuns {
            workflow: workflow.to_string(),
        }
        .into()
    })
}
