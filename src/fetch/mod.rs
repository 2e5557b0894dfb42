//! Resilient page fetching.
//!
//! A fetch is a short state machine: attempt, and on failure either pause and
//! attempt again or give up once the retries are spent. Every failure is
//! retryable; each one is recorded so that an exhausted fetch can report what
//! happened on every attempt.

mod transport;

use std::thread;
use std::time::Duration;

use log::{debug, error};
use thiserror::Error;

use crate::error_handling::{get_retry_schedule, FetchFailure};

pub use transport::{HttpTransport, Transport};

/// Every attempt of a fetch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load HTML from {url} after {attempts} attempts")]
pub struct Exhausted {
    pub url: String,
    pub attempts: usize,
    /// One failure per attempt, in attempt order.
    pub errors: Vec<FetchFailure>,
}

impl Exhausted {
    /// Failure descriptions in attempt order, as stored in the failed-URL journal.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Drives fetch attempts over a [`Transport`].
///
/// Attempts and pauses block the calling thread. There is no cancellation: a
/// fetch runs until it succeeds or its retries are spent. `timeout` bounds each
/// attempt, not the whole fetch.
#[derive(Debug, Clone)]
pub struct Fetcher<T: Transport = HttpTransport> {
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `url`, making at most `max_retries + 1` attempts.
    ///
    /// After each failed attempt except the last, the thread sleeps for
    /// `wait_between`.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] carrying one failure per attempt when no attempt
    /// succeeded.
    pub fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        max_retries: usize,
        wait_between: Duration,
    ) -> Result<String, Exhausted> {
        let mut schedule = get_retry_schedule(max_retries, wait_between);
        let mut errors: Vec<FetchFailure> = Vec::with_capacity(max_retries + 1);
        let mut attempt = 1;

        loop {
            match self.transport.get(url, timeout) {
                Ok(markup) => {
                    debug!(
                        "Loaded {} bytes from {} on attempt {}",
                        markup.len(),
                        url,
                        attempt
                    );
                    return Ok(markup);
                }
                Err(failure) => {
                    let failure = failure.at_attempt(attempt);
                    error!("{} for {}", failure, url);
                    errors.push(failure);
                }
            }

            match schedule.next() {
                Some(wait) => {
                    if !wait.is_zero() {
                        thread::sleep(wait);
                    }
                    attempt += 1;
                }
                None => break,
            }
        }

        error!(
            "Failed to load HTML after {} retries for {}",
            max_retries, url
        );
        Err(Exhausted {
            url: url.to_string(),
            attempts: attempt,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchFailureKind;
    use std::cell::Cell;
    use std::time::Instant;

    /// Transport that fails a fixed number of times before succeeding.
    struct FlakyTransport {
        failures_before_success: usize,
        calls: Cell<usize>,
    }

    impl FlakyTransport {
        fn new(failures_before_success: usize) -> Self {
            Self {
                failures_before_success,
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for FlakyTransport {
        fn get(&self, _url: &str, _timeout: Duration) -> Result<String, FetchFailure> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures_before_success {
                Err(FetchFailure::new(
                    FetchFailureKind::Transport,
                    format!("connection reset ({})", call),
                ))
            } else {
                Ok("<p>ok</p>".to_string())
            }
        }
    }

    #[test]
    fn test_always_failing_fetch_makes_retries_plus_one_attempts() {
        let fetcher = Fetcher::new(FlakyTransport::new(usize::MAX));

        let exhausted = fetcher
            .fetch("https://x.test", Duration::from_secs(1), 2, Duration::ZERO)
            .expect_err("every attempt fails");

        assert_eq!(fetcher.transport().calls.get(), 3);
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(exhausted.errors.len(), 3);
        let attempts: Vec<_> = exhausted.errors.iter().map(|e| e.attempt).collect();
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[test]
    fn test_success_after_failures_stops_retrying() {
        let fetcher = Fetcher::new(FlakyTransport::new(2));

        let markup = fetcher
            .fetch("https://x.test", Duration::from_secs(1), 5, Duration::ZERO)
            .expect("third attempt succeeds");

        assert_eq!(markup, "<p>ok</p>");
        assert_eq!(fetcher.transport().calls.get(), 3);
    }

    #[test]
    fn test_zero_retries_makes_one_attempt() {
        let fetcher = Fetcher::new(FlakyTransport::new(usize::MAX));
        let exhausted = fetcher
            .fetch("https://x.test", Duration::from_secs(1), 0, Duration::ZERO)
            .expect_err("single attempt fails");
        assert_eq!(exhausted.attempts, 1);
        assert_eq!(fetcher.transport().calls.get(), 1);
    }

    #[test]
    fn test_waits_between_attempts_but_not_after_last() {
        let fetcher = Fetcher::new(FlakyTransport::new(usize::MAX));
        let wait = Duration::from_millis(40);

        let started = Instant::now();
        let _ = fetcher.fetch("https://x.test", Duration::from_secs(1), 2, wait);
        let elapsed = started.elapsed();

        // Two pauses between three attempts
        assert!(elapsed >= wait * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < wait * 3 + Duration::from_millis(500), "elapsed {:?}", elapsed);
    }

    #[test]
    fn test_exhausted_messages_describe_each_attempt() {
        let fetcher = Fetcher::new(FlakyTransport::new(usize::MAX));
        let exhausted = fetcher
            .fetch("https://x.test", Duration::from_secs(1), 1, Duration::ZERO)
            .expect_err("fails");
        assert_eq!(
            exhausted.messages(),
            vec![
                "Network error on attempt 1: connection reset (1)",
                "Network error on attempt 2: connection reset (2)",
            ]
        );
    }

    #[test]
    fn test_closure_transport() {
        let fetcher = Fetcher::new(|url: &str, _timeout: Duration| {
            Ok::<_, FetchFailure>(format!("<p>{}</p>", url))
        });
        let markup = fetcher
            .fetch("https://x.test", Duration::from_secs(1), 0, Duration::ZERO)
            .expect("closure succeeds");
        assert_eq!(markup, "<p>https://x.test</p>");
    }
}
