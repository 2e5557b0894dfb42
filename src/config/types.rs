//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_FAILED_JOURNAL_FILE, DEFAULT_MAX_RETRIES, DEFAULT_RULES_FILE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_UNMATCHED_JOURNAL_FILE, DEFAULT_USER_AGENT, DEFAULT_WAIT_BETWEEN_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Every file location the reader touches is carried here; nothing is looked up
/// from process-wide state.
///
/// # Examples
///
/// ```no_run
/// use selective_web_reader::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     rules_path: PathBuf::from("./project/url_configs.json"),
///     max_retries: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Rule configuration file (JSON list of rule records)
    pub rules_path: PathBuf,

    /// Journal of URLs no rule matched
    pub unmatched_journal_path: PathBuf,

    /// Journal of URLs whose fetch was exhausted
    pub failed_journal_path: PathBuf,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,

    /// Retries after the first attempt
    pub max_retries: usize,

    /// Fixed pause between attempts in seconds
    pub wait_between_seconds: u64,

    /// Fall back to the `_default_` rule when no pattern matches
    pub allow_default: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Per-attempt timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Pause between attempts as a `Duration`.
    pub fn wait_between(&self) -> Duration {
        Duration::from_secs(self.wait_between_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_FILE),
            unmatched_journal_path: PathBuf::from(DEFAULT_UNMATCHED_JOURNAL_FILE),
            failed_journal_path: PathBuf::from(DEFAULT_FAILED_JOURNAL_FILE),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            wait_between_seconds: DEFAULT_WAIT_BETWEEN_SECS,
            allow_default: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// selective_web_reader read https://example.com/blog/post1 --output post1.html
/// selective_web_reader add-rule example.com/blog --include article --remove script --remove nav
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "selective_web_reader",
    about = "Reduces web pages to the fragments selected by per-URL rules."
)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Rule configuration file
    #[arg(long, global = true, value_parser, default_value = DEFAULT_RULES_FILE)]
    pub rules: PathBuf,

    /// Journal file for URLs without a matching rule
    #[arg(long, global = true, value_parser, default_value = DEFAULT_UNMATCHED_JOURNAL_FILE)]
    pub unmatched: PathBuf,

    /// Journal file for URLs that could not be fetched
    #[arg(long, global = true, value_parser, default_value = DEFAULT_FAILED_JOURNAL_FILE)]
    pub failed: PathBuf,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Retries after the first attempt
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Seconds to wait between attempts
    #[arg(long, global = true, default_value_t = DEFAULT_WAIT_BETWEEN_SECS)]
    pub wait: u64,

    /// Use the `_default_` rule for URLs no pattern matches
    #[arg(long, global = true)]
    pub allow_default: bool,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a URL and print (or save) its reduced markup
    Read {
        /// URL to read
        url: String,

        /// Write the reduced markup here instead of printing it
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Register a rule for one or more URL patterns
    AddRule {
        /// URL substrings the rule applies to
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Include selector (repeatable); defaults to `h1` and `p`
        #[arg(long = "include")]
        include: Vec<String>,

        /// Remove selector (repeatable); defaults to common page chrome
        #[arg(long = "remove")]
        remove: Vec<String>,

        /// Replace existing rules for these patterns
        #[arg(long)]
        overwrite: bool,
    },
}

impl From<GlobalOpts> for Config {
    fn from(opts: GlobalOpts) -> Self {
        Self {
            rules_path: opts.rules,
            unmatched_journal_path: opts.unmatched,
            failed_journal_path: opts.failed,
            user_agent: opts.user_agent,
            timeout_seconds: opts.timeout,
            max_retries: opts.max_retries,
            wait_between_seconds: opts.wait,
            allow_default: opts.allow_default,
            log_level: opts.log_level,
            log_format: opts.log_format,
        }
    }
}
