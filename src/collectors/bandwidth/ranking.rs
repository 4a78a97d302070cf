//! Ranking and aggregation of throughput samples

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::stats::{TOTAL_LABEL, ThroughputSample};

/// Metric used to rank samples, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Receive plus transmit byte rate
    #[default]
    Total,
    Rx,
    Tx,
    RxPackets,
    TxPackets,
}

impl SortMode {
    fn key(self, sample: &ThroughputSample) -> f64 {
        match self {
            SortMode::Total => sample.total_bytes_per_sec(),
            SortMode::Rx => sample.rx_bytes_per_sec,
            SortMode::Tx => sample.tx_bytes_per_sec,
            SortMode::RxPackets => sample.rx_packets_per_sec,
            SortMode::TxPackets => sample.tx_packets_per_sec,
        }
    }
}

impl FromStr for SortMode {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(SortMode::Total),
            "rx" => Ok(SortMode::Rx),
            "tx" => Ok(SortMode::Tx),
            "rx-packets" | "rx-pkts" => Ok(SortMode::RxPackets),
            "tx-packets" | "tx-pkts" => Ok(SortMode::TxPackets),
            other => Err(MonitorError::InvalidSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortMode::Total => "total",
            SortMode::Rx => "rx",
            SortMode::Tx => "tx",
            SortMode::RxPackets => "rx-packets",
            SortMode::TxPackets => "tx-packets",
        };
        f.write_str(label)
    }
}

/// Orders samples by `mode`, highest first; equal keys keep their input order
pub fn sort_samples(mut samples: Vec<ThroughputSample>, mode: SortMode) -> Vec<ThroughputSample> {
    // sort_by is stable
    samples.sort_by(|a, b| mode.key(b).total_cmp(&mode.key(a)));
    samples
}

/// Builds the synthetic `TOTAL` sample summing every rate across `samples`
///
/// Link speed is always unknown on the aggregate, since summing heterogeneous
/// link speeds means nothing.
pub fn aggregate_samples(samples: &[ThroughputSample]) -> ThroughputSample {
    samples
        .iter()
        .fold(ThroughputSample::zeroed(TOTAL_LABEL), |mut total, sample| {
            total.rx_bytes_per_sec += sample.rx_bytes_per_sec;
            total.tx_bytes_per_sec += sample.tx_bytes_per_sec;
            total.rx_packets_per_sec += sample.rx_packets_per_sec;
            total.tx_packets_per_sec += sample.tx_packets_per_sec;
            total.rx_errs_per_sec += sample.rx_errs_per_sec;
            total.tx_errs_per_sec += sample.tx_errs_per_sec;
            total.rx_drop_per_sec += sample.rx_drop_per_sec;
            total.tx_drop_per_sec += sample.tx_drop_per_sec;
            total.rx_multicast_per_sec += sample.rx_multicast_per_sec;
            total
        })
}
