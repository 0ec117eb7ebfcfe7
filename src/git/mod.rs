//! Git operations for release workflows.
//!
//! Tags are created with the git CLI so that the user's signing setup
//! (`gpg.program`, `user.signingkey`) applies unchanged.

mod tagging;

pub use tagging::{push_tags, tag_args, tag_release};
