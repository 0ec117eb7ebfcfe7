//! Error types for artifact_release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for artifact_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all artifact_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// GitHub Actions API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Archive extraction errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// CLI argument and subprocess errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// GitHub Actions API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The API kept answering with a non-200 status
    #[error("Got HTTP {status} fetching {url}")]
    UnexpectedStatus {
        /// Final HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The workflow has no matching runs
    #[error("No workflow runs found for '{workflow}'")]
    NoWorkflowRuns {
        /// Workflow file name
        workflow: String,
    },

    /// No artifact with the requested name is attached to the run
    #[error("Didn't find artifact '{name}' (available: {available:?})")]
    ArtifactNotFound {
        /// Requested artifact name
        name: String,
        /// Names of the artifacts that were present
        available: Vec<String>,
    },

    /// A bounded polling loop gave up
    #[error("Gave up waiting for {what} after {polls} poll(s)")]
    PollExhausted {
        /// What was being waited for
        what: String,
        /// Number of polls performed
        polls: u32,
    },

    /// The run's artifacts contained no packaging files
    #[error("No files ending in {suffixes:?} found in the run's artifacts")]
    NoPackagesFound {
        /// Suffixes that were searched for
        suffixes: Vec<String>,
    },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive could not be read
    #[error("Failed to read ZIP archive: {0}")]
    Read(String),

    /// An entry would escape the destination directory
    #[error("Invalid ZIP entry path (potential traversal attack): {0}")]
    UnsafePath(String),

    /// Two artifacts carry a package of the same name with different content
    #[error("Conflicting package '{name}' found in more than one artifact")]
    Conflict {
        /// Base name of the package file
        name: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// No access token was supplied
    #[error("GitHub token not provided. Set GITHUB_TOKEN or use --token")]
    MissingToken,

    /// A required program is not installed
    #[error("Required tool '{tool}' not found on PATH")]
    ToolNotFound {
        /// Program name
        tool: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Cli(CliError::MissingToken) => vec![
                "Create a token with actions permissions at https://github.com/settings/tokens/new"
                    .to_string(),
                "Export it: export GITHUB_TOKEN=<token>".to_string(),
            ],
            ReleaseError::Cli(CliError::ToolNotFound { tool }) => vec![
                format!("Install '{}' and make sure it is on PATH", tool),
            ],
            ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 401, .. })
            | ReleaseError::GitHub(GitHubError::UnexpectedStatus { status: 403, .. }) => vec![
                "Verify the token is valid and has the repo/actions scope".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::ArtifactNotFound { available, .. }) => vec![
                format!("Artifacts on the latest run: {}", available.join(", ")),
                "Check the artifact name passed on the command line".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::NoWorkflowRuns { workflow }) => vec![
                format!("Check that '{}' has a successful run on main", workflow),
            ],
            ReleaseError::GitHub(GitHubError::NoPackagesFound { .. }) => vec![
                "Inspect the workflow run's artifacts in the Actions UI".to_string(),
                "Adjust --suffix if the build produces other file types".to_string(),
            ],
            ReleaseError::Archive(ArchiveError::Conflict { name }) => vec![
                format!("Check which build jobs upload {}", name),
                "Each package must come from exactly one artifact".to_string(),
            ],
            ReleaseError::Cli(CliError::ExecutionFailed { command, .. })
                if command.starts_with("git") =>
            {
                vec![
                    "Delete a half-created tag: git tag -d <version>".to_string(),
                    "Re-run with --skip-tag once the tag is pushed".to_string(),
                ]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Cli(CliError::MissingToken)
                | ReleaseError::Cli(CliError::ToolNotFound { .. })
                | ReleaseError::Cli(CliError::InvalidArguments { .. })
                | ReleaseError::GitHub(GitHubError::ArtifactNotFound { .. })
                | ReleaseError::Archive(ArchiveError::UnsafePath(_))
                | ReleaseError::Archive(ArchiveError::Conflict { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_not_recoverable() {
        let err = ReleaseError::from(GitHubError::ArtifactNotFound {
            name: "openssl-macos".to_string(),
            available: vec!["openssl-windows".to_string()],
        });
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("openssl-macos"));
        assert!(err.recovery_suggestions()[0].contains("openssl-windows"));
    }

    #[test]
    fn unexpected_status_is_recoverable() {
        let err = ReleaseError::from(GitHubError::UnexpectedStatus {
            status: 502,
            url: "https://api.github.com/x".to_string(),
        });
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "GitHub error: Got HTTP 502 fetching https://api.github.com/x"
        );
    }

    #[test]
    fn auth_failures_suggest_checking_token() {
        let err = ReleaseError::from(GitHubError::UnexpectedStatus {
            status: 401,
            url: "u".to_string(),
        });
        assert!(err.recovery_suggestions()[0].contains("token"));
    }
}
