use std::time::Duration;

use crate::config::{Config, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT, DEFAULT_WAIT_BETWEEN};

/// Per-call knobs for [`SelectiveReader::process`](super::SelectiveReader::process).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Fall back to the `_default_` rule when no pattern matches.
    pub allow_default: bool,
    /// Bound on each fetch attempt.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: usize,
    /// Fixed pause between attempts.
    pub wait_between: Duration,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            allow_default: false,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            wait_between: DEFAULT_WAIT_BETWEEN,
        }
    }
}

impl From<&Config> for ProcessOptions {
    fn from(config: &Config) -> Self {
        Self {
            allow_default: config.allow_default,
            timeout: config.timeout(),
            max_retries: config.max_retries,
            wait_between: config.wait_between(),
        }
    }
}
