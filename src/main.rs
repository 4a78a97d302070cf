use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use netrate::cli::{Cli, Monitor};
use netrate::collectors::{ProcNetDev, RateSampler, SysfsAttributes};
use netrate::settings::MonitorConfig;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let config = MonitorConfig::load(cli.config.as_deref())?;
    let settings = cli.settings(&config)?;
    debug!("Resolved settings: {:?}", settings);

    let sampler = RateSampler::new(
        ProcNetDev::with_path(&config.counter_table),
        SysfsAttributes::with_root(&config.sysfs_root),
    );
    let monitor = Monitor::new(sampler, settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = if cli.list_interfaces {
        monitor.list(&mut out)?
    } else {
        let running = monitor.running_flag();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("Failed to install interrupt handler")?;
        monitor.run(&mut out)?
    };

    Ok(ExitCode::from(outcome.exit_code()))
}
