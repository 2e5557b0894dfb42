//! Insertion-ordered pattern → rule table.

use log::debug;

use super::{AddOutcome, RuleRecord, SelectionRule};
use crate::config::DEFAULT_PATTERN;

#[derive(Debug, Clone)]
struct PatternEntry {
    pattern: String,
    rule: usize,
}

/// Pattern → rule mapping that keeps insertion order.
///
/// Several patterns may share one rule. Resolution walks the patterns in the order
/// they were first registered and returns the rule of the first pattern contained
/// in the URL.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: Vec<PatternEntry>,
    rules: Vec<SelectionRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rule records.
    ///
    /// Every pattern of every record is registered unless it is already present;
    /// the first registration of a pattern wins and later duplicates are dropped.
    /// A record whose patterns are all duplicates contributes nothing.
    pub fn from_records(records: impl IntoIterator<Item = RuleRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            let fresh: Vec<String> = record
                .url_pattern
                .into_iter()
                .filter(|p| !table.contains(p))
                .fold(Vec::new(), |mut acc, p| {
                    if !acc.contains(&p) {
                        acc.push(p);
                    }
                    acc
                });
            if fresh.is_empty() {
                continue;
            }
            table.push_rule(fresh, record.include_selectors, record.remove_selectors);
        }
        debug!(
            "Loaded {} URL patterns across {} rules",
            table.entries.len(),
            table.rules.len()
        );
        table
    }

    /// Converts the table back into records.
    ///
    /// Consecutive patterns that point at the same rule are grouped into one
    /// record, so `from_records(table.to_records())` rebuilds the same table with
    /// the same match order.
    pub fn to_records(&self) -> Vec<RuleRecord> {
        let mut records: Vec<RuleRecord> = Vec::new();
        let mut last_rule: Option<usize> = None;
        for entry in &self.entries {
            match records.last_mut() {
                Some(record) if last_rule == Some(entry.rule) => {
                    record.url_pattern.push(entry.pattern.clone());
                }
                _ => {
                    let rule = &self.rules[entry.rule];
                    records.push(RuleRecord {
                        url_pattern: vec![entry.pattern.clone()],
                        include_selectors: rule.include.clone(),
                        remove_selectors: rule.exclude.clone(),
                    });
                }
            }
            last_rule = Some(entry.rule);
        }
        records
    }

    /// Returns `true` if `pattern` is registered.
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.iter().any(|e| e.pattern == pattern)
    }

    /// Returns the rule registered under exactly `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&SelectionRule> {
        self.entries
            .iter()
            .find(|e| e.pattern == pattern)
            .map(|e| &self.rules[e.rule])
    }

    /// Registered patterns in match order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the rule of the first pattern that occurs anywhere in `url`.
    ///
    /// Matching is plain substring containment. The reserved default pattern is
    /// skipped here; see [`RuleTable::default_rule`].
    pub fn find_match(&self, url: &str) -> Option<&SelectionRule> {
        self.entries
            .iter()
            .filter(|e| e.pattern != DEFAULT_PATTERN)
            .find(|e| url.contains(e.pattern.as_str()))
            .map(|e| &self.rules[e.rule])
    }

    /// Returns the catch-all rule, if one is registered.
    pub fn default_rule(&self) -> Option<&SelectionRule> {
        self.get(DEFAULT_PATTERN)
    }

    /// Resolves `url` to a rule.
    ///
    /// Falls back to the default rule only when `allow_default` is set.
    pub fn resolve(&self, url: &str, allow_default: bool) -> Option<&SelectionRule> {
        self.find_match(url).or_else(|| {
            if allow_default {
                self.default_rule()
            } else {
                None
            }
        })
    }

    /// Registers a rule for `patterns`.
    ///
    /// Without `overwrite`, nothing changes if any of the patterns is already
    /// registered. With `overwrite`, existing patterns are re-pointed at the new
    /// rule in place, keeping their position in the match order; new patterns are
    /// appended.
    pub fn insert(
        &mut self,
        patterns: Vec<String>,
        include: Vec<String>,
        exclude: Vec<String>,
        overwrite: bool,
    ) -> AddOutcome {
        let mut unique: Vec<String> = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            if !unique.contains(&pattern) {
                unique.push(pattern);
            }
        }
        if unique.is_empty() {
            return AddOutcome::Skipped;
        }

        let existing = unique.iter().any(|p| self.contains(p));
        if existing && !overwrite {
            return AddOutcome::Skipped;
        }

        let rule_index = self.rules.len();
        self.rules.push(SelectionRule {
            patterns: unique.clone(),
            include,
            exclude,
        });

        for pattern in unique {
            match self.entries.iter().position(|e| e.pattern == pattern) {
                Some(pos) => {
                    let previous = self.entries[pos].rule;
                    self.rules[previous].patterns.retain(|p| p != &pattern);
                    self.entries[pos].rule = rule_index;
                }
                None => self.entries.push(PatternEntry {
                    pattern,
                    rule: rule_index,
                }),
            }
        }

        if existing {
            AddOutcome::Replaced
        } else {
            AddOutcome::Added
        }
    }

    fn push_rule(&mut self, patterns: Vec<String>, include: Vec<String>, exclude: Vec<String>) {
        let rule_index = self.rules.len();
        for pattern in &patterns {
            self.entries.push(PatternEntry {
                pattern: pattern.clone(),
                rule: rule_index,
            });
        }
        self.rules.push(SelectionRule {
            patterns,
            include,
            exclude,
        });
    }
}
