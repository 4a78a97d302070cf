use log::{debug, trace};
use std::fs;
use std::path::PathBuf;

use super::{AttributeSource, CounterSource};
use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::stats::{
    AttributeMap, CounterSnapshot, InterfaceAttributes, InterfaceCounters,
};

pub const DEFAULT_COUNTER_TABLE: &str = "/proc/net/dev";
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";

/// Number of counter columns after the interface name
const COUNTER_FIELDS: usize = 16;
const HEADER_LINES: usize = 2;

/// Counter source reading the kernel's per-interface table
#[derive(Debug, Clone)]
pub struct ProcNetDev {
    path: PathBuf,
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcNetDev {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_COUNTER_TABLE)
    }

    /// Reads the table from another location (containers, tests)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CounterSource for ProcNetDev {
    fn read(&self) -> Result<CounterSnapshot, MonitorError> {
        let origin = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)
            .map_err(|e| MonitorError::source_unavailable(&origin, e.to_string()))?;
        let snapshot = parse_counter_table(&content, &origin)?;
        debug!(
            "Read counter table {} (interfaces={})",
            origin,
            snapshot.len()
        );
        Ok(snapshot)
    }
}

/// Parses counter-table text into a snapshot
///
/// The first two lines are headers and are skipped unconditionally. Lines
/// without a colon or with fewer than sixteen fields are skipped silently so
/// newer kernel formats keep working. A non-numeric value in one of the
/// sixteen counter columns makes the whole table malformed.
pub fn parse_counter_table(content: &str, origin: &str) -> Result<CounterSnapshot, MonitorError> {
    let mut snapshot = CounterSnapshot::new();

    for (index, line) in content.lines().enumerate().skip(HEADER_LINES) {
        let Some((name_part, data_part)) = line.split_once(':') else {
            trace!("Skipping line {} without interface separator", index + 1);
            continue;
        };

        let fields: Vec<&str> = data_part.split_whitespace().collect();
        if fields.len() < COUNTER_FIELDS {
            trace!(
                "Skipping short line {} ({} of {} fields)",
                index + 1,
                fields.len(),
                COUNTER_FIELDS
            );
            continue;
        }

        let mut values = [0u64; COUNTER_FIELDS];
        for (slot, raw) in values.iter_mut().zip(&fields) {
            *slot = raw.parse().map_err(|_| {
                MonitorError::source_unavailable(
                    origin,
                    format!("line {}: invalid counter value '{}'", index + 1, raw),
                )
            })?;
        }

        let name = name_part.trim().to_string();
        let [
            rx_bytes,
            rx_packets,
            rx_errs,
            rx_drop,
            rx_fifo,
            rx_frame,
            rx_compressed,
            rx_multicast,
            tx_bytes,
            tx_packets,
            tx_errs,
            tx_drop,
            tx_fifo,
            tx_colls,
            tx_carrier,
            tx_compressed,
        ] = values;

        snapshot.insert(
            name.clone(),
            InterfaceCounters {
                name,
                rx_bytes,
                rx_packets,
                rx_errs,
                rx_drop,
                rx_fifo,
                rx_frame,
                rx_compressed,
                rx_multicast,
                tx_bytes,
                tx_packets,
                tx_errs,
                tx_drop,
                tx_fifo,
                tx_colls,
                tx_carrier,
                tx_compressed,
            },
        );
    }

    Ok(snapshot)
}

/// Attribute source reading `mtu`, `speed` and `operstate` below a sysfs directory
#[derive(Debug, Clone)]
pub struct SysfsAttributes {
    root: PathBuf,
}

impl Default for SysfsAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsAttributes {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_SYSFS_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_value(&self, name: &str, attribute: &str) -> Option<String> {
        let path = self.root.join(name).join(attribute);
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw.trim().to_string()),
            Err(e) => {
                trace!("Attribute {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    fn read_one(&self, name: &str) -> InterfaceAttributes {
        InterfaceAttributes {
            name: name.to_string(),
            mtu: self.read_value(name, "mtu").as_deref().and_then(parse_mtu),
            speed_mbps: self.read_value(name, "speed").as_deref().and_then(parse_speed),
            operstate: self
                .read_value(name, "operstate")
                .filter(|state| !state.is_empty()),
        }
    }
}

impl AttributeSource for SysfsAttributes {
    fn read(&self, names: &[&str]) -> AttributeMap {
        names
            .iter()
            .map(|name| (name.to_string(), self.read_one(name)))
            .collect()
    }
}

fn parse_mtu(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|mtu| *mtu > 0)
}

/// The kernel reports -1 when there is no carrier; that and zero mean unknown
fn parse_speed(raw: &str) -> Option<u32> {
    raw.parse::<i64>()
        .ok()
        .filter(|speed| *speed > 0)
        .and_then(|speed| u32::try_from(speed).ok())
}
