//! Error types for interface sampling and report rendering
//!
//! Data-source failures are fatal for the read that hit them and are propagated
//! to the caller. Per-interface attribute gaps never show up here; they degrade
//! to "unknown" inside the attribute source.

use log::warn;
use thiserror::Error;

/// Errors raised by the sampling engine and its enumerated options
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The counter table could not be opened, read or parsed
    #[error("counter table unavailable ({path}): {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// An unrecognised display unit was requested
    #[error("invalid unit '{0}': expected 'bytes' or 'bits'")]
    InvalidUnit(String),

    /// An unrecognised sort mode was requested
    #[error("invalid sort mode '{0}': expected one of total, rx, tx, rx-packets, tx-packets")]
    InvalidSortMode(String),

    /// Sampling interval is zero, negative or not a finite number of seconds
    #[error("interval must be a finite number of seconds greater than zero (got {0})")]
    InvalidInterval(f64),

    /// Display limit of zero interfaces
    #[error("top must be greater than zero (got {0})")]
    InvalidTopLimit(usize),

    /// Layered configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl MonitorError {
    /// Builds a `SourceUnavailable` error for the given path
    pub fn source_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from a data source rather than from user input
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Logs a structured error event for a failed sampling cycle
pub fn log_error_event(error: &MonitorError, context: &str, cycle: u64) {
    warn!(
        "Sampling error event: context={}, cycle={}, source_failure={}, error={}",
        context,
        cycle,
        error.is_source_failure(),
        error
    );
}
