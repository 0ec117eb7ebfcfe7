mod common;

use assert_cmd::Command;
use common::{artifacts_body, run_json, runs_body, zip_archive};
use predicates::prelude::*;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("artifact_release").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("ARTIFACT_RELEASE_API_URL")
        .env("ARTIFACT_RELEASE_RETRY_API", "0");
    cmd
}

#[test]
fn help_lists_commands() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("download"));
}

#[test]
fn unknown_platform_is_a_usage_error() {
    bin()
        .args(["download", "solaris", "openssl"])
        .assert()
        .code(2);
}

#[test]
fn download_without_token_fails() {
    bin()
        .args(["download", "windows", "openssl-win64"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Fatal error: GitHub token not provided"));
}

#[test]
fn malformed_repo_is_rejected() {
    bin()
        .env("GITHUB_TOKEN", "t0ken")
        .args(["release", "42.0.1", "--repo", "cryptography", "--skip-tag", "--skip-upload"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected: owner/repo"));
}

#[test]
fn download_extracts_into_dest() {
    let mut server = mockito::Server::new();
    let base = server.url();
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(
                r"^/repos/pyca/infra/actions/workflows/build-windows-openssl\.yml/runs".to_string(),
            ),
        )
        .with_status(200)
        .with_body(runs_body(&base, &[(9, Some("success"))]))
        .create();
    server
        .mock("GET", "/repos/pyca/cryptography/actions/runs/9/artifacts")
        .with_status(200)
        .with_body(artifacts_body(&base, &[(30, "openssl-win64")]))
        .create();
    server
        .mock("GET", "/download/30/zip")
        .with_status(200)
        .with_body(zip_archive(&[("lib/libcrypto.lib", "lib")]))
        .create();
    let dir = tempfile::tempdir().unwrap();

    bin()
        .env("GITHUB_TOKEN", "t0ken")
        .args(["--quiet", "--api-url", base.as_str(), "download", "windows", "openssl-win64"])
        .arg("--dest")
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("openssl-win64/lib/libcrypto.lib")).unwrap(),
        "lib"
    );
}

#[test]
fn missing_artifact_exits_nonzero() {
    let mut server = mockito::Server::new();
    let base = server.url();
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(
                r"^/repos/pyca/infra/actions/workflows/build-macos-openssl\.yml/runs".to_string(),
            ),
        )
        .with_status(200)
        .with_body(runs_body(&base, &[(9, Some("success"))]))
        .create();
    server
        .mock("GET", "/repos/pyca/cryptography/actions/runs/9/artifacts")
        .with_status(200)
        .with_body(artifacts_body(&base, &[(30, "openssl-macos-x86-64")]))
        .create();
    let dir = tempfile::tempdir().unwrap();

    bin()
        .env("GITHUB_TOKEN", "t0ken")
        .args(["--api-url", base.as_str(), "download", "macos", "openssl-macos-arm64"])
        .arg("--dest")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("openssl-macos-arm64"));
}

#[test]
fn release_prints_token_link_even_with_token() {
    let mut server = mockito::Server::new();
    let base = server.url();
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(
                r"^/repos/pyca/cryptography/actions/workflows/wheel-builder\.yml/runs".to_string(),
            ),
        )
        .with_status(200)
        .with_body(runs_body(&base, &[(1, Some("success"))]))
        .create();
    server
        .mock("GET", "/repos/pyca/cryptography/actions/runs/1")
        .with_status(200)
        .with_body(run_json(&base, 1, Some("success")).to_string())
        .create();
    server
        .mock("GET", "/repos/pyca/cryptography/actions/runs/1/artifacts")
        .with_status(200)
        .with_body(artifacts_body(&base, &[(10, "sdist")]))
        .create();
    server
        .mock("GET", "/download/10/zip")
        .with_status(200)
        .with_body(zip_archive(&[("cryptography-42.0.1.tar.gz", "sdist")]))
        .create();
    let dir = tempfile::tempdir().unwrap();

    bin()
        .env("GITHUB_TOKEN", "t0ken")
        .args(["--api-url", base.as_str(), "release", "42.0.1", "--skip-tag", "--skip-upload"])
        .arg("--dist-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://github.com/settings/tokens/new?description=42.0.1&scopes=repo",
        ));

    assert!(dir.path().join("cryptography-42.0.1.tar.gz").exists());
}
