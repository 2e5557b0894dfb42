//! Rule table kept in sync with its persisted configuration.

use std::path::Path;

use log::{debug, info};

use super::{AddOutcome, RuleRecord, RuleTable, SelectionRule};
use crate::error_handling::{ReaderError, StorageError};
use crate::storage::{flush_list, FileBackend, PersistenceBackend};

/// A `RuleTable` loaded once from a backend and written back on every change.
pub struct RuleStore {
    table: RuleTable,
    backend: Box<dyn PersistenceBackend>,
}

impl RuleStore {
    /// Opens the rule configuration file at `path`.
    ///
    /// # Errors
    ///
    /// - `ReaderError::ConfigMissing` if the file does not exist
    /// - `ReaderError::ConfigInvalid` if it is not a list of rule records
    pub fn open_file(path: &Path) -> Result<Self, ReaderError> {
        let backend = FileBackend::new(path);
        if !backend.exists() {
            return Err(ReaderError::ConfigMissing {
                path: path.to_path_buf(),
            });
        }
        Self::open(Box::new(backend))
    }

    /// Loads the rule table from `backend`.
    ///
    /// An empty backend is treated like a missing configuration file.
    pub fn open(backend: Box<dyn PersistenceBackend>) -> Result<Self, ReaderError> {
        let location = backend.location();
        debug!("Loading URL configurations from: {}", location);

        let contents = backend.load()?.ok_or_else(|| ReaderError::ConfigMissing {
            path: location.clone().into(),
        })?;
        let records: Vec<RuleRecord> =
            serde_json::from_str(&contents).map_err(|e| ReaderError::ConfigInvalid {
                source_name: location.clone(),
                reason: e.to_string(),
            })?;
        debug!("Loaded {} rule records from {}", records.len(), location);

        Ok(Self {
            table: RuleTable::from_records(records),
            backend,
        })
    }

    /// Creates a store over an empty table and persists it immediately.
    pub fn create(backend: Box<dyn PersistenceBackend>) -> Result<Self, StorageError> {
        let store = Self {
            table: RuleTable::new(),
            backend,
        };
        store.flush()?;
        Ok(store)
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// See [`RuleTable::resolve`].
    pub fn resolve(&self, url: &str, allow_default: bool) -> Option<&SelectionRule> {
        self.table.resolve(url, allow_default)
    }

    /// Registers (or with `overwrite`, replaces) a rule and persists the table.
    ///
    /// Nothing is written when the call is skipped.
    pub fn add_rule(
        &mut self,
        patterns: Vec<String>,
        include: Vec<String>,
        exclude: Vec<String>,
        overwrite: bool,
    ) -> Result<AddOutcome, StorageError> {
        let summary = patterns.join(", ");
        let outcome = self.table.insert(patterns, include, exclude, overwrite);
        match outcome {
            AddOutcome::Skipped => {
                debug!(
                    "Rule for [{}] not added: pattern already configured",
                    summary
                );
            }
            AddOutcome::Added | AddOutcome::Replaced => {
                self.flush()?;
                info!(
                    "Rule for [{}] {} in {}",
                    summary,
                    if outcome == AddOutcome::Added {
                        "added"
                    } else {
                        "replaced"
                    },
                    self.backend.location()
                );
            }
        }
        Ok(outcome)
    }

    /// Writes the whole table back to the backend.
    pub fn flush(&self) -> Result<(), StorageError> {
        flush_list(self.backend.as_ref(), &self.table.to_records())
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

impl std::fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleStore")
            .field("patterns", &self.table.len())
            .field("location", &self.backend.location())
            .finish()
    }
}
