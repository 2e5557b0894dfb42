//! Process-level setup: the logger and the HTTP client.
//!
//! Both return `InitializationError` so the binary can report setup failures
//! the same way it reports reader failures.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
