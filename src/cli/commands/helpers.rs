//! Shared helper functions for command execution.

use crate::cli::Platform;
use crate::config::EnvConfig;
use crate::error::{CliError, ReleaseError, Result};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Parse GitHub repository string into owner/repo tuple
pub(super) fn parse_github_repo(repo: &str) -> Result<(String, String)> {
    match repo.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: format!(
                "Invalid GitHub repository format: '{}'. Expected: owner/repo",
                repo
            ),
        })),
    }
}

/// Ask for a token without echoing it when stdin is a terminal
pub(super) fn read_token(prompt: &str) -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        non_empty_token(rpassword::prompt_password(prompt)?)
    } else {
        prompt_token(prompt, &mut stdin.lock(), &mut std::io::stderr())
    }
}

/// Read a token from `input` after writing `prompt` to `output`
pub(super) fn prompt_token<I: BufRead, O: Write>(
    prompt: &str,
    input: &mut I,
    output: &mut O,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    non_empty_token(rpassword::read_password_from_bufread(input)?)
}

fn non_empty_token(answer: String) -> Result<String> {
    let token = answer.trim();
    if token.is_empty() {
        return Err(ReleaseError::Cli(CliError::MissingToken));
    }
    Ok(token.to_string())
}

/// Directory under which a platform's artifacts are extracted
pub(super) fn default_dest_root(platform: Platform, env: &EnvConfig) -> Result<PathBuf> {
    match platform {
        Platform::Windows => Ok(PathBuf::from("C:/")),
        Platform::Macos => env.home_dir().ok_or_else(|| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: "HOME is not set; pass --dest".to_string(),
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_must_have_two_parts() {
        assert_eq!(
            parse_github_repo("pyca/infra").unwrap(),
            ("pyca".to_string(), "infra".to_string())
        );
        assert!(parse_github_repo("pyca").is_err());
        assert!(parse_github_repo("pyca/infra/extra").is_err());
        assert!(parse_github_repo("/infra").is_err());
    }

    #[test]
    fn prompt_trims_token() {
        let mut input = std::io::Cursor::new(b"ghp_secret\n".to_vec());
        let mut output = Vec::new();
        let token = prompt_token("Token: ", &mut input, &mut output).unwrap();
        assert_eq!(token, "ghp_secret");
        assert_eq!(output, b"Token: ");
    }

    #[test]
    fn prompt_never_writes_the_token() {
        let mut input = std::io::Cursor::new(b"ghp_secret\r\n".to_vec());
        let mut output = Vec::new();
        let token = prompt_token("Token: ", &mut input, &mut output).unwrap();
        assert_eq!(token, "ghp_secret");
        assert!(!String::from_utf8(output).unwrap().contains("ghp_secret"));
    }

    #[test]
    fn empty_prompt_answer_is_missing_token() {
        let mut input = std::io::Cursor::new(b"\n".to_vec());
        let err = prompt_token("Token: ", &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ReleaseError::Cli(CliError::MissingToken)));
    }

    #[test]
    fn platform_roots() {
        let env = EnvConfig::from_pairs([("HOME", "/Users/ci")]);
        assert_eq!(
            default_dest_root(Platform::Windows, &env).unwrap(),
            PathBuf::from("C:/")
        );
        assert_eq!(
            default_dest_root(Platform::Macos, &env).unwrap(),
            PathBuf::from("/Users/ci")
        );
    }
}
