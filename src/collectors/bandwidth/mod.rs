//! Throughput sampling module
//!
//! This module turns two counter snapshots into ranked, formatted per-second
//! rates. It is split into focused sub-modules:
//!
//! - `collector`: `RateSampler` and the pure rate derivation
//! - `errors`: `MonitorError` and error event logging
//! - `stats`: counter snapshots, interface attributes and throughput samples
//! - `ranking`: sort modes and the synthetic TOTAL aggregate
//! - `formatting`: unit-scaled rates, count rates, utilization and report lines
//!
//! ## Usage
//!
//! ```no_run
//! use netrate::collectors::bandwidth::RateSampler;
//! use netrate::collectors::platform::{ProcNetDev, SysfsAttributes};
//! use std::time::Duration;
//!
//! let sampler = RateSampler::new(ProcNetDev::new(), SysfsAttributes::new());
//! let (samples, elapsed) = sampler.sample(Duration::from_secs(1), None)?;
//! # Ok::<(), netrate::collectors::bandwidth::MonitorError>(())
//! ```

pub mod collector;
pub mod errors;
pub mod formatting;
pub mod ranking;
pub mod stats;

pub use collector::{RateSampler, compute_samples};
pub use errors::MonitorError;
pub use formatting::{
    DisplayOptions, RateUnit, format_count_rate, format_rate, format_utilization,
    summarize_samples,
};
pub use ranking::{SortMode, aggregate_samples, sort_samples};
pub use stats::{
    AttributeMap, CounterSnapshot, InterfaceAttributes, InterfaceCounters, SamplingWindow,
    ThroughputSample,
};

#[cfg(test)]
pub mod tests;
