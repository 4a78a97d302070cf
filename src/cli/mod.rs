pub mod commands;
pub mod monitor;

pub use commands::{Cli, MonitorSettings};
pub use monitor::{Monitor, RunOutcome};
