// Shared helpers for building readers over temporary files.

use std::path::{Path, PathBuf};

use selective_web_reader::Config;

/// Writes `rules_json` as the rule file inside `dir` and returns its path.
pub fn write_rules(dir: &Path, rules_json: &str) -> PathBuf {
    let path = dir.join("url_configs.json");
    std::fs::write(&path, rules_json).expect("Failed to write rule file");
    path
}

/// A config whose files all live in `dir`, with fast retries.
pub fn config_in(dir: &Path, rules_json: &str) -> Config {
    Config {
        rules_path: write_rules(dir, rules_json),
        unmatched_journal_path: dir.join("unconfigured_urls.json"),
        failed_journal_path: dir.join("errored_urls.json"),
        timeout_seconds: 5,
        max_retries: 2,
        wait_between_seconds: 0,
        ..Default::default()
    }
}

/// Rule JSON with a single rule for `pattern`.
#[allow(dead_code)] // Not every test file uses it
pub fn single_rule(pattern: &str, include: &[&str], remove: &[&str]) -> String {
    serde_json::json!([{
        "url_pattern": [pattern],
        "include_selectors": include,
        "remove_selectors": remove,
    }])
    .to_string()
}
