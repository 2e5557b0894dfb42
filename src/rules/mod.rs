//! URL-pattern selection rules.
//!
//! This module provides:
//! - `RuleRecord`: one entry of the rule configuration file
//! - `SelectionRule`: the include/exclude selectors bound to one or more patterns
//! - `RuleTable`: insertion-ordered pattern → rule resolution
//! - `RuleStore`: a table kept in sync with its persisted configuration
//!
//! # Configuration file format
//!
//! ```json
//! [
//!     {
//!         "url_pattern": ["example.com/blog", "blog.example.com"],
//!         "include_selectors": ["article"],
//!         "remove_selectors": ["script", "nav"]
//!     },
//!     {
//!         "url_pattern": ["_default_"],
//!         "include_selectors": ["h1", "p"],
//!         "remove_selectors": ["script"]
//!     }
//! ]
//! ```
//!
//! A pattern matches a URL when it occurs anywhere inside it. `_default_` marks the
//! catch-all rule, used only when the caller allows it.

mod store;
mod table;

use serde::{Deserialize, Serialize};

pub use store::RuleStore;
pub use table::RuleTable;

/// One record of the rule configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub url_pattern: Vec<String>,
    #[serde(default)]
    pub include_selectors: Vec<String>,
    #[serde(default)]
    pub remove_selectors: Vec<String>,
}

/// Include/exclude selectors applied to pages whose URL matches one of `patterns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRule {
    pub patterns: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Result of registering a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Every pattern was new.
    Added,
    /// At least one pattern existed and was re-pointed at the new rule.
    Replaced,
    /// Nothing changed.
    Skipped,
}
