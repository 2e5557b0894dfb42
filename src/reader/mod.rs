//! The selective reader: rule resolution, fetching, extraction and journaling
//! composed into `process(url)`.
//!
//! A reader owns its rule store and both journals. Every operation that can
//! write to them takes `&mut self`, so one reader is driven by one caller at a
//! time. Two readers pointed at the same files are not coordinated.

mod options;

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error, info};
use url::Url;

use crate::config::{Config, DEFAULT_INCLUDE_SELECTORS, DEFAULT_REMOVE_SELECTORS};
use crate::error_handling::{ReaderError, StorageError};
use crate::extract::{Extractor, MarkupEngine, ScraperEngine};
use crate::fetch::{Fetcher, HttpTransport, Transport};
use crate::initialization::init_client;
use crate::journal::{Journal, JournalKind};
use crate::rules::{AddOutcome, RuleStore, RuleTable, SelectionRule};
use crate::storage::FileBackend;

pub use options::ProcessOptions;

/// File name used by [`SelectiveReader::save_html`] when the URL path has no
/// final segment.
const INDEX_FILE_NAME: &str = "index.html";

/// Reduces web pages to the fragments their URL's rule selects.
///
/// # Examples
///
/// ```no_run
/// use selective_web_reader::{Config, ProcessOptions, SelectiveReader};
///
/// # fn main() -> Result<(), selective_web_reader::ReaderError> {
/// let mut reader = SelectiveReader::new(&Config::default())?;
/// let markup = reader.process("https://example.com/blog/post1", &ProcessOptions::default())?;
/// println!("{}", markup);
/// # Ok(())
/// # }
/// ```
pub struct SelectiveReader<T: Transport = HttpTransport, M: MarkupEngine = ScraperEngine> {
    rules: RuleStore,
    unmatched: Journal,
    failed: Journal,
    fetcher: Fetcher<T>,
    extractor: Extractor<M>,
    options: ProcessOptions,
    last: Option<Processed>,
}

/// The most recent successful `process` result.
struct Processed {
    url: String,
    markup: String,
}

impl SelectiveReader {
    /// Builds a reader over the files named in `config`.
    ///
    /// The rule file must exist. The journals are created on their first write.
    ///
    /// # Errors
    ///
    /// - `ReaderError::ConfigMissing` / `ConfigInvalid` for the rule file
    /// - `ReaderError::Initialization` if the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self, ReaderError> {
        let rules = RuleStore::open_file(&config.rules_path)?;
        let client = init_client(&config.user_agent)?;

        debug!(
            "Reader configured with rules at {}, journals at {} and {}",
            config.rules_path.display(),
            config.unmatched_journal_path.display(),
            config.failed_journal_path.display()
        );

        Ok(Self::with_parts(
            rules,
            Journal::new(
                JournalKind::Unmatched,
                Box::new(FileBackend::new(&config.unmatched_journal_path)),
            ),
            Journal::new(
                JournalKind::Failed,
                Box::new(FileBackend::new(&config.failed_journal_path)),
            ),
            Fetcher::new(HttpTransport::new(client)),
            Extractor::new(),
            ProcessOptions::from(config),
        ))
    }
}

impl<T: Transport, M: MarkupEngine> SelectiveReader<T, M> {
    /// Assembles a reader from explicit parts (in-memory backends, scripted
    /// transports, another markup engine).
    pub fn with_parts(
        rules: RuleStore,
        unmatched: Journal,
        failed: Journal,
        fetcher: Fetcher<T>,
        extractor: Extractor<M>,
        options: ProcessOptions,
    ) -> Self {
        Self {
            rules,
            unmatched,
            failed,
            fetcher,
            extractor,
            options,
            last: None,
        }
    }

    /// Options used by [`read`](Self::read).
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Finds the rule for `url`.
    ///
    /// A URL that no specific pattern matches is recorded in the unmatched
    /// journal, even when the `_default_` rule is then applied.
    ///
    /// # Errors
    ///
    /// `ReaderError::NoRuleMatch` when no pattern matches and the default rule
    /// is not allowed or not configured. `previously_seen` tells whether the URL
    /// was already journaled.
    pub fn resolve(&mut self, url: &str, allow_default: bool) -> Result<SelectionRule, ReaderError> {
        if let Some(rule) = self.rules.table().find_match(url) {
            debug!("Selectors for {}: {:?}", url, rule);
            return Ok(rule.clone());
        }

        let outcome = self.unmatched.record(url, &[])?;

        if allow_default {
            if let Some(rule) = self.rules.table().default_rule() {
                debug!("Using default selectors for {}: {:?}", url, rule);
                return Ok(rule.clone());
            }
        }

        error!(
            "No configuration found for {} in {}",
            url,
            self.rules.location()
        );
        Err(ReaderError::NoRuleMatch {
            url: url.to_string(),
            previously_seen: outcome.is_duplicate(),
        })
    }

    /// Registers a rule for `patterns`; see [`RuleTable::insert`] for how
    /// existing patterns are treated.
    pub fn add_rule(
        &mut self,
        patterns: Vec<String>,
        include: Vec<String>,
        exclude: Vec<String>,
        overwrite: bool,
    ) -> Result<AddOutcome, ReaderError> {
        Ok(self.rules.add_rule(patterns, include, exclude, overwrite)?)
    }

    /// Registers `pattern` with the default include and remove selectors,
    /// unless it is already configured.
    pub fn add_default_rule(&mut self, pattern: &str) -> Result<AddOutcome, ReaderError> {
        self.add_rule(
            vec![pattern.to_string()],
            to_owned_list(DEFAULT_INCLUDE_SELECTORS),
            to_owned_list(DEFAULT_REMOVE_SELECTORS),
            false,
        )
    }

    /// Fetches `url`, journaling it in the failed journal when every attempt fails.
    ///
    /// # Errors
    ///
    /// `ReaderError::FetchExhausted` with one description per attempt.
    pub fn fetch(
        &mut self,
        url: &str,
        timeout: Duration,
        max_retries: usize,
        wait_between: Duration,
    ) -> Result<String, ReaderError> {
        match self.fetcher.fetch(url, timeout, max_retries, wait_between) {
            Ok(markup) => Ok(markup),
            Err(exhausted) => {
                let errors = exhausted.messages();
                let outcome = self.failed.record(url, &errors)?;
                Err(ReaderError::FetchExhausted {
                    url: url.to_string(),
                    errors,
                    previously_journaled: outcome.is_duplicate(),
                })
            }
        }
    }

    /// Applies `rule` to `markup`, resolving links against `url`.
    ///
    /// Failures are neither retried nor journaled.
    pub fn extract(
        &self,
        markup: &str,
        rule: &SelectionRule,
        url: &str,
    ) -> Result<String, ReaderError> {
        self.extractor.extract(markup, rule, url).map_err(|source| {
            error!("Error encountered while processing {}: {}", url, source);
            ReaderError::ExtractionFailure {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Resolves, fetches and extracts `url`.
    ///
    /// On success the reduced markup is also kept as [`last_markup`](Self::last_markup).
    /// No partial result is kept on failure.
    pub fn process(&mut self, url: &str, options: &ProcessOptions) -> Result<String, ReaderError> {
        let rule = self.resolve(url, options.allow_default)?;
        let markup = self.fetch(
            url,
            options.timeout,
            options.max_retries,
            options.wait_between,
        )?;
        let reduced = self.extract(&markup, &rule, url)?;

        debug!("Reduced {} from {} to {} bytes", url, markup.len(), reduced.len());
        self.last = Some(Processed {
            url: url.to_string(),
            markup: reduced.clone(),
        });
        Ok(reduced)
    }

    /// [`process`](Self::process) with the reader's configured options.
    pub fn read(&mut self, url: &str) -> Result<String, ReaderError> {
        let options = self.options;
        self.process(url, &options)
    }

    pub fn last_markup(&self) -> Option<&str> {
        self.last.as_ref().map(|p| p.markup.as_str())
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last.as_ref().map(|p| p.url.as_str())
    }

    /// Writes the last reduced document to `path`, or to a file in the working
    /// directory named after the last URL's final path segment.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// `ReaderError::NothingToSave` before any successful `process`.
    pub fn save_html(&self, path: Option<&Path>) -> Result<PathBuf, ReaderError> {
        let processed = self.last.as_ref().ok_or(ReaderError::NothingToSave)?;
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(file_name_for(&processed.url)),
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                location: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(&target, &processed.markup).map_err(|source| StorageError::Io {
            location: target.display().to_string(),
            source,
        })?;

        info!("HTML content saved to {}", target.display());
        Ok(target)
    }

    pub fn rules(&self) -> &RuleTable {
        self.rules.table()
    }

    pub fn unmatched_journal(&self) -> &Journal {
        &self.unmatched
    }

    pub fn failed_journal(&self) -> &Journal {
        &self.failed
    }
}

impl<T: Transport, M: MarkupEngine> std::fmt::Debug for SelectiveReader<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectiveReader")
            .field("rules", &self.rules)
            .field("unmatched", &self.unmatched)
            .field("failed", &self.failed)
            .field("options", &self.options)
            .field("last_url", &self.last_url())
            .finish()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `<last path segment>.html`, or `index.html` for an empty path.
fn file_name_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(|segment| format!("{}.html", segment))
        })
        .unwrap_or_else(|| INDEX_FILE_NAME.to_string())
}
