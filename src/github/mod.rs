//! GitHub Actions integration: runs, artifacts and their archives

mod client;
mod models;
mod poll;

pub use client::ActionsClient;
pub use models::{Artifact, ArtifactList, WorkflowRun, WorkflowRunList};
pub use poll::{latest_run_with_refetch, wait_for_completion, wait_for_workflow_run};
