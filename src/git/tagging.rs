//! Signed release tags.

use crate::error::Result;
use crate::process::CommandRunner;

/// Arguments for `git tag` creating the signed, annotated tag for `version`
pub fn tag_args(version: &str) -> Vec<String> {
    vec![
        "tag".to_string(),
        "-s".to_string(),
        version.to_string(),
        "-m".to_string(),
        format!("{} release", version),
    ]
}

/// Create a signed tag named after `version`
pub async fn tag_release<R: CommandRunner>(runner: &R, version: &str) -> Result<()> {
    runner.run("git", &tag_args(version)).await
}

/// Push all local tags to the default remote, triggering the wheel builder
pub async fn push_tags<R: CommandRunner>(runner: &R) -> Result<()> {
    runner
        .run("git", &["push".to_string(), "--tags".to_string()])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingRunner;

    #[test]
    fn tag_message_names_the_release() {
        assert_eq!(tag_args("42.0.1"), vec!["tag", "-s", "42.0.1", "-m", "42.0.1 release"]);
    }

    #[tokio::test]
    async fn tag_then_push() {
        let runner = RecordingRunner::new();
        tag_release(&runner, "1.0").await.unwrap();
        push_tags(&runner).await.unwrap();
        let calls = runner.calls();
        assert_eq!(calls[0], vec!["git", "tag", "-s", "1.0", "-m", "1.0 release"]);
        assert_eq!(calls[1], vec!["git", "push", "--tags"]);
    }
}
