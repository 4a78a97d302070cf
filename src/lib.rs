//! Host-local network throughput monitor
//!
//! Reads the kernel's per-interface counter table twice per cycle, derives
//! per-second rates and renders a ranked text report.

pub mod cli;
pub mod collectors;
pub mod settings;
