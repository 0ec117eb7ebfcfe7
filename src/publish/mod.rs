//! Package index uploads.
//!
//! The upload itself is delegated to an external tool (twine by default)
//! which owns credentials and index configuration.

mod upload;

pub use upload::{upload_args, upload_packages};
