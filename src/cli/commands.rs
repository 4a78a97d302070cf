use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::formatting::{DisplayOptions, RateUnit};
use crate::collectors::bandwidth::ranking::SortMode;
use crate::settings::{MonitorConfig, validate_interval, validate_top};

/// Main CLI structure for the netrate application
/// Uses clap's derive macros for automatic CLI generation
#[derive(Parser, Debug)]
#[command(version)] // Automatically uses version from Cargo.toml
#[command(about = "Real-time network throughput monitoring via /proc/net/dev")]
#[command(long_about = "Samples the kernel's per-interface counters twice per cycle, derives per-second \
throughput, packet, error, drop and multicast rates, and prints the busiest interfaces.\n\n\
Examples:\n  \
netrate                                   # Top 5 interfaces, refreshed every second\n  \
netrate -i 2 -c 10 --unit bits            # Ten 2-second samples in bits per second\n  \
netrate --interfaces eth0 wlan0 --show-total\n  \
netrate --sort rx-packets --show-packets --show-drops\n  \
netrate --list-interfaces                 # Print interface details and exit")]
pub struct Cli {
    /// Sampling interval in seconds
    #[arg(short = 'i', long, help = "Sampling interval in seconds (default: 1.0)")]
    pub interval: Option<f64>,

    /// Number of sampling cycles to run
    #[arg(short = 'c', long, default_value_t = 0, help = "Number of samples to capture (0 = infinite)")]
    pub count: u64,

    /// How many interfaces to display per cycle
    #[arg(short = 't', long, help = "Number of interfaces to display per sample (default: 5)")]
    pub top: Option<usize>,

    /// Restrict monitoring to these interface names
    #[arg(long, num_args = 0.., help = "Specific interface names to monitor (none = all)")]
    pub interfaces: Option<Vec<String>>,

    #[arg(long, default_value = "bytes", help = "Display rates in bytes or bits")]
    pub unit: RateUnit,

    #[arg(
        long,
        default_value = "total",
        help = "Sort interfaces by: total, rx, tx, rx-packets, tx-packets"
    )]
    pub sort: SortMode,

    #[arg(long, help = "Include packet rates in the output")]
    pub show_packets: bool,

    #[arg(long, help = "Include error rates in the output")]
    pub show_errors: bool,

    #[arg(long, help = "Include drop rates in the output")]
    pub show_drops: bool,

    #[arg(long, help = "Include multicast receive rates in the output")]
    pub show_multicast: bool,

    #[arg(long, help = "Include utilization estimates when link speed is known")]
    pub show_utilization: bool,

    #[arg(long, help = "Include an aggregate total line across interfaces")]
    pub show_total: bool,

    #[arg(long, help = "Show interface details (state, MTU, speed) before samples")]
    pub details: bool,

    #[arg(long, help = "List detected interfaces and exit")]
    pub list_interfaces: bool,

    #[arg(long, help = "Print each sample as a JSON object instead of text")]
    pub json: bool,

    /// Optional configuration file layered under environment variables and flags
    #[arg(long, value_name = "FILE", help = "Read defaults from a configuration file")]
    pub config: Option<PathBuf>,
}

/// Everything the monitor loop needs, after config and flags are merged
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    pub interval: Duration,
    /// Number of cycles; zero runs until interrupted
    pub count: u64,
    pub top: usize,
    pub interfaces: Option<HashSet<String>>,
    pub sort: SortMode,
    pub display: DisplayOptions,
    pub show_total: bool,
    pub show_details: bool,
    pub json: bool,
}

impl Cli {
    /// Applies command-line flags on top of the loaded configuration
    pub fn settings(&self, config: &MonitorConfig) -> Result<MonitorSettings, MonitorError> {
        let interval_secs = self.interval.unwrap_or(config.interval_secs);
        validate_interval(interval_secs)?;
        let interval = Duration::try_from_secs_f64(interval_secs)
            .map_err(|_| MonitorError::InvalidInterval(interval_secs))?;

        let top = self.top.unwrap_or(config.top);
        validate_top(top)?;

        Ok(MonitorSettings {
            interval,
            count: self.count,
            top,
            // A bare `--interfaces` selects every interface
            interfaces: self
                .interfaces
                .as_ref()
                .filter(|names| !names.is_empty())
                .map(|names| names.iter().cloned().collect()),
            sort: self.sort,
            display: DisplayOptions {
                unit: self.unit,
                packets: self.show_packets,
                errors: self.show_errors,
                drops: self.show_drops,
                multicast: self.show_multicast,
                utilization: self.show_utilization,
            },
            show_total: self.show_total,
            show_details: self.details,
            json: self.json,
        })
    }
}
