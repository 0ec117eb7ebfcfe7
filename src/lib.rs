//! # artifact_release
//!
//! Release automation over GitHub Actions artifacts.
//!
//! A release tags the version, pushes the tag, waits for the wheel builder
//! workflow that the tag triggers, pulls the packages out of every artifact
//! of that run and hands them to the package index upload tool. A download
//! fetches one named artifact from the latest successful run of a build
//! workflow and unpacks it locally.
//!
//! ## Usage
//!
//! ```bash
//! artifact_release release 42.0.1                   # tag, build, upload
//! artifact_release release 42.0.1 --skip-upload     # stop after dist/
//! artifact_release download macos openssl-macos-universal2
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod git;
pub mod github;
pub mod process;
pub mod publish;
pub mod release;

pub use cli::{Args, RetryConfig, RuntimeConfig};
pub use config::EnvConfig;
pub use download::{DownloadConfig, perform_download};
pub use error::{ReleaseError, Result};
pub use github::ActionsClient;
pub use process::{CommandRunner, RecordingRunner, SystemCommandRunner};
pub use release::{ReleaseConfig, ReleaseResult, perform_release};
