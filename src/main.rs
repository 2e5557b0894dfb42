//! Command-line entry point.
//!
//! A thin wrapper around the `selective_web_reader` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing or saving the reduced page
//!
//! All reading, rule and journal logic lives in the library crate.

use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use selective_web_reader::config::{
    Command, Opt, DEFAULT_INCLUDE_SELECTORS, DEFAULT_REMOVE_SELECTORS,
};
use selective_web_reader::initialization::init_logger_with;
use selective_web_reader::{validate_and_normalize_url, AddOutcome, Config, SelectiveReader};

fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::from(opt.global);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt.command, &config) {
        eprintln!("selective_web_reader error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

fn run(command: Command, config: &Config) -> Result<()> {
    let mut reader = SelectiveReader::new(config).context("Failed to open the reader")?;

    match command {
        Command::Read { url, output } => {
            let Some(url) = validate_and_normalize_url(&url) else {
                bail!("Invalid URL: {}", url);
            };
            let markup = reader
                .read(&url)
                .with_context(|| format!("Failed to read {}", url))?;
            match output {
                Some(path) => {
                    let written = reader.save_html(Some(path.as_path()))?;
                    println!("Saved {} to {}", url, written.display());
                }
                None => println!("{}", markup),
            }
        }
        Command::AddRule {
            patterns,
            include,
            remove,
            overwrite,
        } => {
            let include = or_defaults(include, DEFAULT_INCLUDE_SELECTORS);
            let remove = or_defaults(remove, DEFAULT_REMOVE_SELECTORS);
            let summary = patterns.join(", ");
            match reader.add_rule(patterns, include, remove, overwrite)? {
                AddOutcome::Added => println!("Added rule for {}", summary),
                AddOutcome::Replaced => println!("Replaced rule for {}", summary),
                AddOutcome::Skipped => println!(
                    "A rule for {} already exists, pass --overwrite to replace it",
                    summary
                ),
            }
        }
    }
    Ok(())
}

fn or_defaults(selectors: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if selectors.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        selectors
    }
}
