//! Utilities for sanitizing error messages before they are journaled.
//!
//! Removes control characters from fetch error descriptions and truncates
//! overly long ones so journal files stay readable.

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) are
/// removed; everything else, including non-ASCII text, is kept.
///
/// # Arguments
///
/// * `message` - The error message to sanitize
///
/// # Returns
///
/// A sanitized version of the message with control characters removed.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .collect()
}

/// Sanitizes and truncates an error message to a maximum length.
///
/// This function:
/// 1. Sanitizes the message by removing control characters
/// 2. Truncates to `MAX_ERROR_MESSAGE_LENGTH` characters if necessary
/// 3. Appends a truncation note if the message was truncated
///
/// Truncation counts characters, never splitting a multi-byte character.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let char_count = sanitized.chars().count();

    if char_count > crate::config::MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = crate::config::MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!(
            "{}... (truncated, original length: {} chars)",
            truncated, char_count
        )
    } else {
        sanitized
    }
}
