//! Process environment snapshot.
//!
//! Commands read the environment through [`EnvConfig`] instead of
//! `std::env` directly, so tests can supply their own variables.

use crate::cli::RetryConfig;
use std::collections::HashMap;
use std::path::PathBuf;

/// Captured environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Snapshot the current process environment
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-empty value of `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    /// GitHub token from `GITHUB_TOKEN`, falling back to `GH_TOKEN`
    pub fn github_token(&self) -> Option<String> {
        self.get("GITHUB_TOKEN").or_else(|| self.get("GH_TOKEN"))
    }

    /// Home directory from `HOME`, falling back to the platform lookup
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.get("HOME").map(PathBuf::from).or_else(dirs::home_dir)
    }

    /// Retry settings from the `ARTIFACT_RELEASE_*` variables
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::from_lookup(|name| self.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_values_count_as_unset() {
        let env = EnvConfig::from_pairs([("GITHUB_TOKEN", "  "), ("GH_TOKEN", "gho_abc")]);
        assert_eq!(env.github_token().as_deref(), Some("gho_abc"));
    }

    #[test]
    fn home_comes_from_env() {
        let env = EnvConfig::from_pairs([("HOME", "/Users/builder")]);
        assert_eq!(env.home_dir(), Some(PathBuf::from("/Users/builder")));
    }

    #[test]
    fn retry_config_reads_prefixed_vars() {
        let env = EnvConfig::from_pairs([("ARTIFACT_RELEASE_RETRY_DELAY_SECS", "0")]);
        assert_eq!(env.retry_config().api_retry_delay, Duration::ZERO);
    }
}
