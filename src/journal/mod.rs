//! Deduplicated journals of URLs that could not be processed.
//!
//! Two journals with identical semantics are kept by the reader: one for URLs no
//! rule matched and one for URLs whose fetch was exhausted. Each is a JSON list of
//! `{url, errors?}` objects with at most one entry per URL.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error_handling::StorageError;
use crate::storage::{flush_list, load_list, PersistenceBackend};
use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// One journaled URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub url: String,
    /// Failure descriptions in attempt order; empty for unmatched URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Which journal an instance represents. Only affects log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalKind {
    Unmatched,
    Failed,
}

impl JournalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalKind::Unmatched => "unmatched URL journal",
            JournalKind::Failed => "failed URL journal",
        }
    }
}

/// Result of [`Journal::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new entry was appended and persisted.
    Recorded,
    /// The URL was already journaled; nothing was written.
    Duplicate,
}

impl RecordOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RecordOutcome::Duplicate)
    }
}

/// A journal backed by a persistence backend.
///
/// Every `record` call is a read-modify-write of the whole list. Two journals
/// sharing one backing file from different readers can lose updates.
pub struct Journal {
    kind: JournalKind,
    backend: Box<dyn PersistenceBackend>,
}

impl Journal {
    pub fn new(kind: JournalKind, backend: Box<dyn PersistenceBackend>) -> Self {
        Self { kind, backend }
    }

    pub fn kind(&self) -> JournalKind {
        self.kind
    }

    /// Records `url` unless it is already present.
    ///
    /// Error descriptions are sanitized and truncated before they are stored.
    pub fn record(&self, url: &str, errors: &[String]) -> Result<RecordOutcome, StorageError> {
        let mut entries: Vec<JournalEntry> = load_list(self.backend.as_ref())?;

        if entries.iter().any(|entry| entry.url == url) {
            warn!(
                "URL {} already present in {} ({}), it has been read before",
                url,
                self.kind.as_str(),
                self.backend.location()
            );
            return Ok(RecordOutcome::Duplicate);
        }

        entries.push(JournalEntry {
            url: url.to_string(),
            errors: errors
                .iter()
                .map(|e| sanitize_and_truncate_error_message(e))
                .collect(),
        });
        flush_list(self.backend.as_ref(), &entries)?;
        warn!(
            "URL {} added to {} ({}) for future reference",
            url,
            self.kind.as_str(),
            self.backend.location()
        );
        debug!("{} now holds {} entries", self.kind.as_str(), entries.len());
        Ok(RecordOutcome::Recorded)
    }

    /// Returns every persisted entry in insertion order.
    pub fn entries(&self) -> Result<Vec<JournalEntry>, StorageError> {
        load_list(self.backend.as_ref())
    }

    /// Returns `true` if `url` has been journaled.
    pub fn contains(&self, url: &str) -> Result<bool, StorageError> {
        Ok(self.entries()?.iter().any(|entry| entry.url == url))
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("kind", &self.kind)
            .field("location", &self.backend.location())
            .finish()
    }
}
