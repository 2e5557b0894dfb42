//! Error type definitions.
//!
//! This module defines all error types used throughout the reader: the typed
//! failures `process` and friends return, the per-attempt fetch failure, and the
//! lower-level storage, extraction and initialization errors they wrap.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for persisted rule and journal files.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("Storage I/O error at {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored contents are not valid JSON for the expected shape.
    #[error("Invalid JSON at {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error types raised by the markup pipeline.
///
/// These are data or programming errors, never transient conditions.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A selector from the rule could not be parsed.
    #[error("Failed to parse selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The URL used to absolutize links is not an absolute URL.
    #[error("Cannot resolve links against '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },

    /// The page could not be streamed through the link rewriter.
    #[error("Failed to rewrite links: {reason}")]
    LinkRewrite { reason: String },
}

/// Categories of a single failed fetch attempt.
///
/// Every category is retryable; the category only shapes the error description
/// that ends up in the failed-URL journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FetchFailureKind {
    /// The response body was cut short or could not be decoded.
    IncompleteRead,
    /// Connection, timeout, redirect or request-level failure.
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// Anything else.
    Other,
}

impl std::fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchFailureKind::IncompleteRead => "Incomplete read",
            FetchFailureKind::Transport => "Network error",
            FetchFailureKind::Status => "HTTP status error",
            FetchFailureKind::Other => "Unhandled error",
        }
    }
}

/// One failed fetch attempt (the transient failure absorbed by the retry loop).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} on attempt {attempt}: {message}")]
pub struct FetchFailure {
    /// 1-based attempt number.
    pub attempt: usize,
    pub kind: FetchFailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            attempt: 0,
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn at_attempt(mut self, attempt: usize) -> Self {
        self.attempt = attempt;
        self
    }
}

/// Errors surfaced by the reader.
///
/// Transient fetch failures never appear here directly: they are absorbed by the
/// retry loop and only show up, accumulated, inside [`ReaderError::FetchExhausted`].
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The rule configuration file does not exist.
    #[error(
        "URL configurations file not found at {}, please ensure the file exists or provide a path to a different file",
        .path.display()
    )]
    ConfigMissing { path: PathBuf },

    /// The rule configuration could not be parsed.
    #[error("URL configurations at {source_name} are invalid: {reason}")]
    ConfigInvalid { source_name: String, reason: String },

    /// No rule applies to the URL.
    #[error("No configuration found for {url}; add a rule for it or allow the default rule")]
    NoRuleMatch {
        url: String,
        /// The URL was already in the unmatched journal before this call.
        previously_seen: bool,
    },

    /// Every fetch attempt failed.
    #[error("Failed to load HTML from {url} after {} attempts", .errors.len())]
    FetchExhausted {
        url: String,
        /// One description per failed attempt, in attempt order.
        errors: Vec<String>,
        /// The URL was already in the failed journal before this call.
        previously_journaled: bool,
    },

    /// The markup pipeline failed.
    #[error("Error encountered while processing {url}: {source}")]
    ExtractionFailure {
        url: String,
        #[source]
        source: ExtractionError,
    },

    /// `save_html` was called before any page was processed.
    #[error("No HTML content to save, load a website first")]
    NothingToSave,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),
}
