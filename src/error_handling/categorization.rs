//! Error categorization and retry schedule.
//!
//! This module provides functions to categorize fetch errors and to build the
//! pause schedule used between fetch attempts.

use std::error::Error as StdError;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::{FetchFailure, FetchFailureKind};

/// Creates the fixed-interval retry schedule.
///
/// Yields `wait_between` once per retry, `max_retries` times in total. The fetch
/// loop consumes one entry before each retry, so no pause follows the final
/// attempt. The pause never grows between retries.
///
/// # Arguments
///
/// * `max_retries` - Retries after the initial attempt
/// * `wait_between` - Pause before each retry
pub fn get_retry_schedule(
    max_retries: usize,
    wait_between: Duration,
) -> impl Iterator<Item = Duration> {
    FixedInterval::new(wait_between).take(max_retries)
}

/// Categorizes a `reqwest::Error` into a `FetchFailureKind`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `FetchFailureKind` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchFailureKind {
    // Status errors carry a status code regardless of the other flags
    if error.status().is_some() || error.is_status() {
        return FetchFailureKind::Status;
    }

    if error.is_body() || error.is_decode() {
        FetchFailureKind::IncompleteRead
    } else if error.is_timeout()
        || error.is_connect()
        || error.is_request()
        || error.is_redirect()
    {
        FetchFailureKind::Transport
    } else {
        FetchFailureKind::Other
    }
}

/// Builds a `FetchFailure` from a `reqwest::Error`.
///
/// The message includes the full source chain, joined with `: `.
pub fn fetch_failure_from_reqwest(error: &reqwest::Error) -> FetchFailure {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    FetchFailure::new(categorize_reqwest_error(error), message)
}
