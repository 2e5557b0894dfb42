//! Utility functions.
//!
//! This module provides:
//! - Error message sanitization for journal entries
//! - URL validation for command-line input

pub mod sanitize;
mod url;

pub use self::url::validate_and_normalize_url;
