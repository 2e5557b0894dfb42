//! URL validation and normalization for command-line input.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL given on the command line.
///
/// Adds an `https://` prefix if no http(s) scheme is present, then checks that the
/// result parses and uses http or https. Logs a warning and returns `None` if the
/// URL is invalid, too long, or uses an unsupported scheme.
///
/// # Arguments
///
/// * `url` - The URL string to validate and normalize
///
/// # Returns
///
/// `Some(normalized_url)` if the URL can be read, `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            normalized.chars().take(50).collect::<String>()
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Skipping unsupported URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}
