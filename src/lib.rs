//! selective_web_reader: reduce web pages to the fragments that matter
//!
//! Pages are fetched with bounded retries, matched to a selection rule by URL
//! pattern, and reduced to the elements the rule's include selectors pick, minus
//! what its remove selectors strip, with hyperlinks made absolute. URLs without
//! a rule, and URLs that could not be fetched, are journaled once each.
//!
//! # Example
//!
//! ```no_run
//! use selective_web_reader::{Config, ProcessOptions, SelectiveReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     rules_path: std::path::PathBuf::from("url_configs.json"),
//!     max_retries: 2,
//!     ..Default::default()
//! };
//!
//! let mut reader = SelectiveReader::new(&config)?;
//! let markup = reader.process(
//!     "https://example.com/blog/post1",
//!     &ProcessOptions::from(&config),
//! )?;
//! println!("{}", markup);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Everything is blocking and single-threaded. Rule and journal files are
//! rewritten whole on each change without locking, so only one reader should
//! use a given set of files at a time.

pub mod config;
mod error_handling;
mod extract;
mod fetch;
pub mod initialization;
mod journal;
mod reader;
mod rules;
mod storage;
mod utils;

// Re-export public API
pub use config::Config;
pub use error_handling::{
    ExtractionError, FetchFailure, FetchFailureKind, InitializationError, ReaderError,
    StorageError,
};
pub use extract::{Extractor, MarkupEngine, ScraperEngine};
pub use fetch::{Exhausted, Fetcher, HttpTransport, Transport};
pub use journal::{Journal, JournalEntry, JournalKind, RecordOutcome};
pub use reader::{ProcessOptions, SelectiveReader};
pub use rules::{AddOutcome, RuleRecord, RuleStore, RuleTable, SelectionRule};
pub use storage::{FileBackend, MemoryBackend, PersistenceBackend};
pub use utils::validate_and_normalize_url;
