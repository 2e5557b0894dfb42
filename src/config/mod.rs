//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (file names, fetch timing, limits)
//! - The library `Config` value passed to the reader at construction
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Command, Config, GlobalOpts, LogFormat, LogLevel, Opt};
