//! Counter snapshots, interface attributes and derived throughput samples
//!
//! Everything in here is plain data. Snapshots are built once per read and
//! samples once per sampling window; nothing is mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Lower bound for a sampling window's elapsed time, in seconds
pub const MIN_ELAPSED_SECS: f64 = 1e-6;

/// Name used for the synthetic aggregate sample
pub const TOTAL_LABEL: &str = "TOTAL";

/// Cumulative counters for one interface at one instant, in counter-table order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceCounters {
    /// Name of the network interface (e.g., "eth0", "wlan0")
    pub name: String,
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errs: u64,
    pub rx_drop: u64,
    pub rx_fifo: u64,
    pub rx_frame: u64,
    pub rx_compressed: u64,
    pub rx_multicast: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errs: u64,
    pub tx_drop: u64,
    pub tx_fifo: u64,
    pub tx_colls: u64,
    pub tx_carrier: u64,
    pub tx_compressed: u64,
}

/// All interfaces' counters from a single read, ordered by name
pub type CounterSnapshot = BTreeMap<String, InterfaceCounters>;

/// Attributes keyed by interface name
pub type AttributeMap = HashMap<String, InterfaceAttributes>;

/// Static or semi-static metadata for an interface; every field may be unknown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceAttributes {
    pub name: String,
    /// Maximum transmission unit in bytes
    pub mtu: Option<u32>,
    /// Advertised link speed in Mbps
    pub speed_mbps: Option<u32>,
    /// Operational state label as reported by the kernel (e.g. "up", "down")
    pub operstate: Option<String>,
}

impl InterfaceAttributes {
    /// Attributes with every field unknown
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Per-second rates for one interface over one sampling window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSample {
    pub name: String,
    pub rx_bytes_per_sec: f64,
    pub tx_bytes_per_sec: f64,
    pub rx_packets_per_sec: f64,
    pub tx_packets_per_sec: f64,
    pub rx_errs_per_sec: f64,
    pub tx_errs_per_sec: f64,
    pub rx_drop_per_sec: f64,
    pub tx_drop_per_sec: f64,
    pub rx_multicast_per_sec: f64,
    /// Link speed in Mbps, carried through for utilization
    pub speed_mbps: Option<u32>,
}

impl ThroughputSample {
    /// A sample with every rate at zero and unknown speed
    pub fn zeroed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rx_bytes_per_sec: 0.0,
            tx_bytes_per_sec: 0.0,
            rx_packets_per_sec: 0.0,
            tx_packets_per_sec: 0.0,
            rx_errs_per_sec: 0.0,
            tx_errs_per_sec: 0.0,
            rx_drop_per_sec: 0.0,
            tx_drop_per_sec: 0.0,
            rx_multicast_per_sec: 0.0,
            speed_mbps: None,
        }
    }

    /// Gets the total bandwidth (receive + transmit) in bytes per second
    pub fn total_bytes_per_sec(&self) -> f64 {
        self.rx_bytes_per_sec + self.tx_bytes_per_sec
    }
}

/// The span between the two counter reads of one sampling cycle
#[derive(Debug, Clone, Copy)]
pub struct SamplingWindow {
    pub start: Instant,
    pub end: Instant,
}

impl SamplingWindow {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Elapsed seconds, never below [`MIN_ELAPSED_SECS`]
    pub fn elapsed_secs(&self) -> f64 {
        self.end
            .saturating_duration_since(self.start)
            .as_secs_f64()
            .max(MIN_ELAPSED_SECS)
    }
}
