//! Error handling.
//!
//! This module provides:
//! - Error type definitions for every failure the reader surfaces
//! - Categorization of HTTP client errors into fetch failure kinds
//! - The fixed-interval retry schedule
//!
//! Only per-attempt fetch failures are transient; they are retried and then
//! reported together once the attempts are exhausted. Everything else
//! propagates to the caller as a typed `ReaderError`.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{fetch_failure_from_reqwest, get_retry_schedule};
pub use types::{
    ExtractionError, FetchFailure, FetchFailureKind, InitializationError, ReaderError,
    StorageError,
};
