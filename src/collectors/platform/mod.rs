use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::stats::{AttributeMap, CounterSnapshot};

// Data sources for interface counters and attributes
// The sampler only sees these traits, so tests can script snapshots in memory

/// Linux implementation backed by /proc/net/dev and /sys/class/net
pub mod linux;

pub use linux::{ProcNetDev, SysfsAttributes};

/// Reads a snapshot of every interface's cumulative counters
pub trait CounterSource {
    fn read(&self) -> Result<CounterSnapshot, MonitorError>;
}

/// Reads per-interface attributes; a missing attribute is reported as unknown, never as an error
pub trait AttributeSource {
    fn read(&self, names: &[&str]) -> AttributeMap;
}

impl<T: CounterSource + ?Sized> CounterSource for &T {
    fn read(&self) -> Result<CounterSnapshot, MonitorError> {
        (**self).read()
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn read(&self, names: &[&str]) -> AttributeMap {
        (**self).read(names)
    }
}

/// Returns every interface name in the counter table, sorted
pub fn list_interfaces(source: &impl CounterSource) -> Result<Vec<String>, MonitorError> {
    // Snapshot keys are already ordered
    Ok(source.read()?.into_keys().collect())
}
