// ABOUTME: Retry settings for the remote API invoker.
// ABOUTME: Backoff base/cap durations and the attempt ceiling.

use crate::api::{CappedExponential, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, MAX_ATTEMPTS};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_base_delay", with = "humantime_serde")]
    pub base_delay: Duration,

    #[serde(default = "default_max_delay", with = "humantime_serde")]
    pub max_delay: Duration,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_base_delay() -> Duration {
    DEFAULT_BASE_DELAY
}

fn default_max_delay() -> Duration {
    DEFAULT_MAX_DELAY
}

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay: default_base_delay(),
            max_delay: default_max_delay(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl RetryConfig {
    pub fn backoff(&self) -> CappedExponential {
        CappedExponential::new(self.base_delay, self.max_delay)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.base_delay > self.max_delay {
            return Err(Error::InvalidConfig(
                "retry.base_delay cannot exceed retry.max_delay".to_string(),
            ));
        }
        Ok(())
    }
}
