//! Command line argument parsing and validation.
//!
//! Two commands: `release` drives a full tag-build-upload cycle, `download`
//! fetches a single named artifact from the latest successful CI run.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Release automation over GitHub Actions artifacts
#[derive(Parser, Debug)]
#[command(
    name = "artifact_release",
    version,
    about = "Wait for CI builds, fetch their artifacts and publish them",
    long_about = "Release automation over GitHub Actions artifacts.

Usage:
  artifact_release release 42.0.1
  artifact_release download macos openssl-macos-universal2"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Show extra progress detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base URL of the GitHub REST API
    #[arg(
        long,
        global = true,
        env = "ARTIFACT_RELEASE_API_URL",
        default_value = DEFAULT_API_URL
    )]
    pub api_url: String,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tag a release, wait for the wheel builder and upload its packages
    Release {
        /// Version to release, e.g. '0.4' or '1.0'
        #[arg(value_name = "VERSION")]
        version: String,

        /// Repository that runs the wheel builder (owner/repo)
        #[arg(long, default_value = "pyca/cryptography")]
        repo: String,

        /// Workflow file that builds the packages
        #[arg(long, default_value = "wheel-builder.yml")]
        workflow: String,

        /// Directory the packages are extracted into
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,

        /// File suffixes to extract from the artifacts (repeatable)
        #[arg(long = "suffix", default_values_t = [".whl".to_string(), ".tar.gz".to_string()])]
        suffixes: Vec<String>,

        /// Package index upload tool, invoked as `<tool> upload <files>`
        #[arg(long, default_value = "twine")]
        upload_tool: String,

        /// Do not create and push the git tag (it already exists upstream)
        #[arg(long)]
        skip_tag: bool,

        /// Stop after downloading the packages
        #[arg(long)]
        skip_upload: bool,

        /// GitHub access token; prompted for when absent
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Download a named artifact from the latest successful build
    Download {
        /// Platform whose build workflow is queried
        #[arg(value_enum, value_name = "PLATFORM")]
        platform: Platform,

        /// Name of the artifact to fetch
        #[arg(value_name = "TARGET")]
        target: String,

        /// Repository that runs the build workflows (owner/repo)
        #[arg(long, default_value = "pyca/infra")]
        repo: String,

        /// Directory the artifact folder is created in (defaults per platform)
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Release { .. } => "release",
            Command::Download { .. } => "download",
        }
    }
}

/// Build platform of the artifact workflows
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows builds, extracted under `C:/`
    Windows,
    /// macOS builds, extracted under `$HOME`
    Macos,
}

impl Platform {
    /// Workflow file that builds this platform's artifacts
    pub fn workflow(self) -> &'static str {
        match self {
            Platform::Windows => "build-windows-openssl.yml",
            Platform::Macos => "build-macos-openssl.yml",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.api_url).is_err() {
            return Err(format!("Invalid API URL: '{}'", self.api_url));
        }

        match &self.command {
            Command::Release {
                version, suffixes, ..
            } => {
                if version.trim().is_empty() {
                    return Err("Version is required".to_string());
                }
                if version.chars().any(char::is_whitespace) {
                    return Err(format!("Version '{}' contains whitespace", version));
                }
                if suffixes.iter().any(|s| s.is_empty()) {
                    return Err("Empty --suffix is not allowed".to_string());
                }
            }
            Command::Download { target, .. } => {
                if target.trim().is_empty() {
                    return Err("Artifact name is required".to_string());
                }
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Configuration that prints nothing but errors
    pub fn quiet() -> Self {
        Self::new(false, true)
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print progress message
    pub fn progress_println(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Echo a subprocess invocation
    pub fn running(&self, program: &str, args: &[String]) {
        let _ = self.output.running(program, args);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}
