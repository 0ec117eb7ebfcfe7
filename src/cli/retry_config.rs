//! Retry and polling configuration for network operations.
//!
//! Provides configurable retry limits and delays, allowing users to tune
//! retry behavior based on network conditions.

use std::time::Duration;

/// Configuration for retry and polling behavior against the CI API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retried attempts per API request before the final, fatal attempt
    pub api_attempts: u32,

    /// Delay between retried API requests
    pub api_retry_delay: Duration,

    /// Delay between polls while waiting for a workflow run
    pub poll_interval: Duration,

    /// Upper bound on polls per wait; `None` polls until the API answers
    pub max_polls: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            api_attempts: 5,
            api_retry_delay: Duration::from_secs(2),
            poll_interval: Duration::from_secs(3),
            max_polls: None,
        }
    }
}

impl RetryConfig {
    /// Maximum allowed value for `api_attempts`
    pub const MAX_API_ATTEMPTS: u32 = 20;

    /// Parse a number from an environment variable with clamping to maximum
    ///
    /// # Arguments
    /// * `value` - Raw variable value, if set
    /// * `default` - Default value if variable is not set or invalid
    /// * `max` - Maximum allowed value (values above this are clamped)
    fn parse_clamped(value: Option<String>, default: u64, max: u64) -> u64 {
        value
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|v| v.min(max))
            .unwrap_or(default)
    }

    /// Create config from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_attempts = Self::parse_clamped(
            lookup("ARTIFACT_RELEASE_RETRY_API"),
            u64::from(defaults.api_attempts),
            u64::from(Self::MAX_API_ATTEMPTS),
        ) as u32;
        let api_retry_delay = Self::parse_clamped(
            lookup("ARTIFACT_RELEASE_RETRY_DELAY_SECS"),
            defaults.api_retry_delay.as_secs(),
            60,
        );
        let poll_interval = Self::parse_clamped(
            lookup("ARTIFACT_RELEASE_POLL_INTERVAL_SECS"),
            defaults.poll_interval.as_secs(),
            300,
        );

        Self {
            api_attempts,
            api_retry_delay: Duration::from_secs(api_retry_delay),
            poll_interval: Duration::from_secs(poll_interval),
            max_polls: defaults.max_polls,
        }
    }

    /// Config without any sleeping, for tests and dry runs
    pub fn immediate(api_attempts: u32) -> Self {
        Self {
            api_attempts,
            api_retry_delay: Duration::ZERO,
            poll_interval: Duration::ZERO,
            max_polls: None,
        }
    }

    /// Validate retry counts are reasonable
    pub fn validate(&self) -> Result<(), String> {
        if self.api_attempts > Self::MAX_API_ATTEMPTS {
            return Err(format!(
                "api_attempts retry count too high: {} (max: {})",
                self.api_attempts,
                Self::MAX_API_ATTEMPTS
            ));
        }
        if self.max_polls == Some(0) {
            return Err("max_polls must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RetryConfig::default();
        assert_eq!(config.api_attempts, 5);
        assert_eq!(config.api_retry_delay, Duration::from_secs(2));
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_values_are_clamped() {
        let config = RetryConfig::from_lookup(|name| match name {
            "ARTIFACT_RELEASE_RETRY_API" => Some("500".to_string()),
            "ARTIFACT_RELEASE_POLL_INTERVAL_SECS" => Some("10".to_string()),
            _ => None,
        });
        assert_eq!(config.api_attempts, RetryConfig::MAX_API_ATTEMPTS);
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.api_retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let config = RetryConfig::from_lookup(|_| Some("soon".to_string()));
        assert_eq!(config, RetryConfig::default());
    }

    #[test]
    fn zero_max_polls_is_rejected() {
        let config = RetryConfig {
            max_polls: Some(0),
            ..RetryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
