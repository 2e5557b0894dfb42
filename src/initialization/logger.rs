//! Logger initialization.

use std::io::Write;

use colored::*;
use log::LevelFilter;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Installs the global logger.
///
/// `RUST_LOG` is read first and `level` then overrides it, so
/// `RUST_LOG=selective_web_reader=debug` still works for ad-hoc debugging while
/// `--log-level` stays authoritative. Parser and HTTP stack crates are kept quiet.
///
/// `Plain` writes a colored level and the record target; `Json` writes one
/// object per line with a millisecond timestamp.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("selective_web_reader", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let label = match level {
                    log::Level::Error => level.as_str().red().bold(),
                    log::Level::Warn => level.as_str().yellow(),
                    log::Level::Info => level.as_str().green(),
                    log::Level::Debug => level.as_str().blue(),
                    log::Level::Trace => level.as_str().purple(),
                };
                writeln!(
                    buf,
                    "[{:<5}] {} {}",
                    label,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    // try_init so tests that initialize more than once do not panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
