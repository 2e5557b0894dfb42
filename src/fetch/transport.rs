//! Single fetch attempts.

use std::time::Duration;

use log::debug;

use crate::error_handling::{fetch_failure_from_reqwest, FetchFailure};

/// Accept header sent with every attempt, matching what a browser sends for a
/// top-level navigation.
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Performs one GET attempt.
///
/// Implementations return the response body as text or describe why the attempt
/// failed. Retrying is the caller's job.
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchFailure>;
}

impl<F> Transport for F
where
    F: Fn(&str, Duration) -> Result<String, FetchFailure>,
{
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchFailure> {
        self(url, timeout)
    }
}

/// HTTP transport on a blocking `reqwest` client.
///
/// The client carries the User-Agent (see `initialization::init_client`); each
/// attempt sets its own timeout. Non-success statuses are failures. Bodies are
/// decoded with the charset the server declares, falling back to UTF-8.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .timeout(timeout)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| fetch_failure_from_reqwest(&e))?;

        debug!(
            "GET {} -> {} ({})",
            url,
            response.status(),
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("no content type")
        );

        response.text().map_err(|e| fetch_failure_from_reqwest(&e))
    }
}
