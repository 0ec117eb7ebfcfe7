use crate::error::{CliError, ReleaseError, Result};
use crate::process::CommandRunner;
use std::path::PathBuf;

/// Arguments for `<tool> upload <paths...>`
pub fn upload_args(paths: &[PathBuf]) -> Vec<String> {
    std::iter::once("upload".to_string())
        .chain(paths.iter().map(|p| p.to_string_lossy().into_owned()))
        .collect()
}

/// Upload the packages at `paths` with `tool`
pub async fn upload_packages<R: CommandRunner>(
    runner: &R,
    tool: &str,
    paths: &[PathBuf],
) -> Result<()> {
    if paths.is_empty() {
        return Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: "No packages to upload".to_string(),
        }));
    }
    log::info!("Uploading {} package(s) with {}", paths.len(), tool);
    runner.run(tool, &upload_args(paths)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingRunner;

    #[tokio::test]
    async fn uploads_every_path_in_one_call() {
        let runner = RecordingRunner::new();
        let paths = vec![
            PathBuf::from("dist/a-1.0-py3-none-any.whl"),
            PathBuf::from("dist/a-1.0.tar.gz"),
        ];
        upload_packages(&runner, "twine", &paths).await.unwrap();
        assert_eq!(
            runner.calls(),
            vec![vec![
                "twine",
                "upload",
                "dist/a-1.0-py3-none-any.whl",
                "dist/a-1.0.tar.gz"
            ]]
        );
    }

    #[tokio::test]
    async fn refuses_empty_upload() {
        let runner = RecordingRunner::new();
        assert!(upload_packages(&runner, "twine", &[]).await.is_err());
        assert!(runner.calls().is_empty());
    }
}
