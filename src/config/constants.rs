//! Configuration constants.
//!
//! This module defines the defaults used throughout the reader: file locations,
//! fetch timing, the reserved catch-all pattern and size limits.

use std::time::Duration;

/// Pattern value reserved for the catch-all rule.
///
/// A rule registered under this pattern never takes part in substring matching;
/// it is only returned when the caller explicitly allows the default rule.
pub const DEFAULT_PATTERN: &str = "_default_";

// Default file locations (relative to the working directory)
pub const DEFAULT_RULES_FILE: &str = "url_configs.json";
pub const DEFAULT_UNMATCHED_JOURNAL_FILE: &str = "unconfigured_urls.json";
pub const DEFAULT_FAILED_JOURNAL_FILE: &str = "errored_urls.json";

/// Default User-Agent string for HTTP requests.
///
/// A generic desktop browser identification, sent with every attempt.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Fetch timing
/// Per-attempt request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
/// Number of retries after the initial attempt (total attempts = retries + 1)
pub const DEFAULT_MAX_RETRIES: usize = 5;
/// Fixed pause between two attempts, in seconds
pub const DEFAULT_WAIT_BETWEEN_SECS: u64 = 2;

/// Default per-attempt timeout as a `Duration`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
/// Default pause between attempts as a `Duration`.
pub const DEFAULT_WAIT_BETWEEN: Duration = Duration::from_secs(DEFAULT_WAIT_BETWEEN_SECS);

// Selectors applied when a rule is added without explicit selectors
pub const DEFAULT_INCLUDE_SELECTORS: &[&str] = &["h1", "p"];
pub const DEFAULT_REMOVE_SELECTORS: &[&str] = &["button", "form", "style", "script", "iframe"];

// Error message and URL size limits
/// Maximum error message length in characters (2000 chars)
/// Error messages longer than this are truncated before they are journaled
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
/// Maximum URL length accepted on the command line
pub const MAX_URL_LENGTH: usize = 2048;

/// Indentation used for every JSON file the reader writes.
pub const JSON_INDENT: &[u8] = b"    ";
