//! HTTP client initialization.

use reqwest::blocking::{Client, ClientBuilder};

use crate::error_handling::InitializationError;

/// Builds the blocking client every fetch attempt goes through.
///
/// The client identifies itself with `user_agent` on every request and follows
/// redirects (reqwest's default policy). Timeouts are set per attempt by the
/// transport, not here.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend or the
/// header value is rejected.
pub fn init_client(user_agent: &str) -> Result<Client, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(user_agent.to_string())
        .build()?;
    Ok(client)
}
