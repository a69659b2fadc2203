//! # regform-adapters
//!
//! Adapter implementations for ports (structured logging and log sinks).
//! This crate depends on `ports`, `shared`, and `config`.

pub mod log_sink;
pub mod logger;

pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::{JsonLogger, NoopLogger, log_level_from_setting, logger_from_config};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
