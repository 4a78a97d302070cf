//! Layered settings: built-in defaults, an optional file, then `NETRATE_*` variables
//!
//! Command-line flags are applied on top by the CLI layer.

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::platform::linux::{DEFAULT_COUNTER_TABLE, DEFAULT_SYSFS_ROOT};

pub const ENV_PREFIX: &str = "NETRATE";
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_TOP: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorConfig {
    /// Path of the per-interface counter table
    pub counter_table: PathBuf,
    /// Directory holding one attribute directory per interface
    pub sysfs_root: PathBuf,
    pub interval_secs: f64,
    pub top: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            counter_table: PathBuf::from(DEFAULT_COUNTER_TABLE),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            interval_secs: DEFAULT_INTERVAL_SECS,
            top: DEFAULT_TOP,
        }
    }
}

impl MonitorConfig {
    /// Loads defaults, then `file` if given, then the process environment
    pub fn load(file: Option<&Path>) -> Result<Self, MonitorError> {
        Self::load_with_env(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`MonitorConfig::load`] with an explicit environment source
    pub fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, MonitorError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("counter_table", defaults.counter_table.display().to_string())?
            .set_default("sysfs_root", defaults.sysfs_root.display().to_string())?
            .set_default("interval_secs", defaults.interval_secs)?
            .set_default("top", defaults.top as i64)?;

        if let Some(path) = file {
            debug!("Loading configuration file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let loaded: Self = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;

        debug!(
            "Configuration loaded (counter_table={}, sysfs_root={}, interval={}s, top={})",
            loaded.counter_table.display(),
            loaded.sysfs_root.display(),
            loaded.interval_secs,
            loaded.top
        );
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        validate_interval(self.interval_secs)?;
        validate_top(self.top)?;
        Ok(())
    }
}

pub fn validate_interval(interval_secs: f64) -> Result<(), MonitorError> {
    if interval_secs.is_finite() && interval_secs > 0.0 {
        Ok(())
    } else {
        Err(MonitorError::InvalidInterval(interval_secs))
    }
}

pub fn validate_top(top: usize) -> Result<(), MonitorError> {
    if top > 0 {
        Ok(())
    } else {
        Err(MonitorError::InvalidTopLimit(top))
    }
}
