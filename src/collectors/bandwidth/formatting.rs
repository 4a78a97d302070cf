//! Formatting utilities for throughput samples
//!
//! This module turns per-second rates into the fixed-width strings used by the
//! report: scaled byte or bit rates, plain count rates for packets and errors,
//! and link utilization percentages. `summarize_samples` assembles them into
//! one report line per interface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::stats::ThroughputSample;

const BYTE_UNITS: [&str; 5] = ["B/s", "KB/s", "MB/s", "GB/s", "TB/s"];
const BIT_UNITS: [&str; 5] = ["b/s", "Kb/s", "Mb/s", "Gb/s", "Tb/s"];

/// Largest utilization percentage ever displayed
pub const MAX_UTILIZATION_PERCENT: f64 = 999.9;

/// Display unit for throughput rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    #[default]
    Bytes,
    Bits,
}

impl RateUnit {
    fn multiplier(self) -> f64 {
        match self {
            RateUnit::Bytes => 1.0,
            RateUnit::Bits => 8.0,
        }
    }

    fn ladder(self) -> &'static [&'static str; 5] {
        match self {
            RateUnit::Bytes => &BYTE_UNITS,
            RateUnit::Bits => &BIT_UNITS,
        }
    }
}

impl FromStr for RateUnit {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bytes" => Ok(RateUnit::Bytes),
            "bits" => Ok(RateUnit::Bits),
            other => Err(MonitorError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::Bytes => f.write_str("bytes"),
            RateUnit::Bits => f.write_str("bits"),
        }
    }
}

/// Which optional metric groups appear in each report line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub unit: RateUnit,
    pub packets: bool,
    pub errors: bool,
    pub drops: bool,
    pub multicast: bool,
    pub utilization: bool,
}

/// Formats a byte rate with a 1024-based unit ladder
///
/// In bits mode the rate is multiplied by 8 before scaling. Scaling stops at
/// TB/s (or Tb/s) even when the value is still above 1024.
///
/// # Examples
///
/// ```
/// use netrate::collectors::bandwidth::formatting::{format_rate, RateUnit};
///
/// assert_eq!(format_rate(0.0, RateUnit::Bytes), "  0.00 B/s");
/// assert_eq!(format_rate(1024.0, RateUnit::Bytes), "  1.00 KB/s");
/// assert_eq!(format_rate(128.0, RateUnit::Bits), "  1.00 Kb/s");
/// ```
pub fn format_rate(rate_bytes: f64, unit: RateUnit) -> String {
    let units = unit.ladder();
    let mut value = rate_bytes * unit.multiplier();
    let mut index = 0;
    while value >= 1024.0 && index < units.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    format!("{:6.2} {}", value, units[index])
}

/// Formats a packet/error/drop rate, never unit-scaled
pub fn format_count_rate(rate: f64) -> String {
    format!("{:5.1}/s", rate)
}

/// Link utilization of a sample, or `"n/a"` when the speed is unknown
pub fn format_utilization(sample: &ThroughputSample) -> String {
    let Some(speed_mbps) = sample.speed_mbps.filter(|speed| *speed > 0) else {
        return "n/a".to_string();
    };
    let total_bits = sample.total_bytes_per_sec() * 8.0;
    let capacity = f64::from(speed_mbps) * 1_000_000.0;
    let utilization = (total_bits / capacity * 100.0).min(MAX_UTILIZATION_PERCENT);
    format!("{:4.1}%", utilization)
}

/// Renders one report line per sample, for at most `limit` samples
///
/// Samples are expected to be ranked already. Column order is fixed: name,
/// RX, TX, TOTAL, then packets, errors, drops, multicast and utilization when
/// enabled in `options`.
pub fn summarize_samples(
    samples: &[ThroughputSample],
    limit: usize,
    options: &DisplayOptions,
) -> Vec<String> {
    samples
        .iter()
        .take(limit)
        .map(|sample| render_line(sample, options))
        .collect()
}

fn render_line(sample: &ThroughputSample, options: &DisplayOptions) -> String {
    let unit = options.unit;
    let mut parts = vec![
        format!("{:<12}", sample.name),
        format!("RX {:>12}", format_rate(sample.rx_bytes_per_sec, unit)),
        format!("TX {:>12}", format_rate(sample.tx_bytes_per_sec, unit)),
        format!("TOTAL {:>12}", format_rate(sample.total_bytes_per_sec(), unit)),
    ];
    if options.packets {
        parts.push(format!(
            "PKTS {:>8}/{:>8}",
            format_count_rate(sample.rx_packets_per_sec),
            format_count_rate(sample.tx_packets_per_sec)
        ));
    }
    if options.errors {
        parts.push(format!(
            "ERR {:>6}/{:>6}",
            format_count_rate(sample.rx_errs_per_sec),
            format_count_rate(sample.tx_errs_per_sec)
        ));
    }
    if options.drops {
        parts.push(format!(
            "DROP {:>6}/{:>6}",
            format_count_rate(sample.rx_drop_per_sec),
            format_count_rate(sample.tx_drop_per_sec)
        ));
    }
    if options.multicast {
        parts.push(format!(
            "MCAST {:>6}",
            format_count_rate(sample.rx_multicast_per_sec)
        ));
    }
    if options.utilization {
        parts.push(format!("UTIL {:>6}", format_utilization(sample)));
    }
    parts.join(" ")
}
