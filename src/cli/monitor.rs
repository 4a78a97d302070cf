//! Sequential monitor loop: sample → rank → aggregate → render → repeat

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::commands::MonitorSettings;
use crate::collectors::bandwidth::RateSampler;
use crate::collectors::bandwidth::errors::log_error_event;
use crate::collectors::bandwidth::formatting::summarize_samples;
use crate::collectors::bandwidth::ranking::{aggregate_samples, sort_samples};
use crate::collectors::bandwidth::stats::{AttributeMap, ThroughputSample};
use crate::collectors::platform::{AttributeSource, CounterSource, list_interfaces};

const RULE_WIDTH: usize = 54;

/// How a monitor run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All requested cycles were rendered
    Completed,
    /// An interrupt was observed at a cycle boundary
    Interrupted,
    /// The first cycle had nothing to show
    NoInterfaces,
}

impl RunOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            RunOutcome::Completed | RunOutcome::Interrupted => 0,
            RunOutcome::NoInterfaces => 1,
        }
    }
}

/// One rendered cycle in JSON mode
#[derive(Debug, Serialize)]
struct CycleReport<'a> {
    timestamp: DateTime<Utc>,
    elapsed_secs: f64,
    samples: &'a [ThroughputSample],
}

pub struct Monitor<C, A> {
    sampler: RateSampler<C, A>,
    settings: MonitorSettings,
    running: Arc<AtomicBool>,
}

impl<C: CounterSource, A: AttributeSource> Monitor<C, A> {
    pub fn new(sampler: RateSampler<C, A>, settings: MonitorSettings) -> Self {
        Self {
            sampler,
            settings,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag cleared by the interrupt handler; checked after every render
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Runs cycles until `count` is reached or an interrupt is seen
    pub fn run(&self, out: &mut impl Write) -> Result<RunOutcome> {
        if self.settings.show_details {
            let names = self.interface_names()?;
            if !names.is_empty() {
                self.render_details(out, "Interface details", &names)?;
            }
        }

        info!(
            "Starting monitor loop (interval={:.3}s, count={}, top={}, sort={})",
            self.settings.interval.as_secs_f64(),
            self.settings.count,
            self.settings.top,
            self.settings.sort
        );

        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let (samples, elapsed) = match self
                .sampler
                .sample(self.settings.interval, self.settings.interfaces.as_ref())
            {
                Ok(result) => result,
                Err(e) => {
                    log_error_event(&e, "sample", cycle);
                    return Err(e).context("Unable to sample interface counters");
                }
            };

            if samples.is_empty() {
                if self.settings.json {
                    warn!("No interfaces matched the provided filters");
                    self.render_cycle(out, &[], 0, elapsed)?;
                } else {
                    writeln!(out, "No interfaces matched the provided filters.")?;
                }
                if cycle == 1 {
                    return Ok(RunOutcome::NoInterfaces);
                }
                warn!("Cycle #{} produced no samples", cycle);
            } else {
                let rows = self.rank(samples);
                let limit = if self.settings.show_total {
                    self.settings.top.max(rows.len())
                } else {
                    self.settings.top
                };
                self.render_cycle(out, &rows, limit, elapsed)?;
            }
            out.flush()?;

            if !self.running.load(Ordering::SeqCst) {
                writeln!(out, "\nStopping netrate.")?;
                info!("Monitor interrupted after {} cycles", cycle);
                return Ok(RunOutcome::Interrupted);
            }
            if self.settings.count != 0 && cycle >= self.settings.count {
                info!("Monitor completed {} cycles", cycle);
                return Ok(RunOutcome::Completed);
            }
        }
    }

    /// Prints interface details and exits; `NoInterfaces` when none are found
    pub fn list(&self, out: &mut impl Write) -> Result<RunOutcome> {
        let names = self.interface_names()?;
        if names.is_empty() {
            writeln!(out, "No interfaces detected.")?;
            return Ok(RunOutcome::NoInterfaces);
        }
        self.render_details(out, "Interfaces", &names)?;
        Ok(RunOutcome::Completed)
    }

    fn rank(&self, samples: Vec<ThroughputSample>) -> Vec<ThroughputSample> {
        let mut ordered = sort_samples(samples, self.settings.sort);
        if self.settings.show_total {
            let total = aggregate_samples(&ordered);
            ordered.push(total);
        }
        ordered
    }

    fn interface_names(&self) -> Result<Vec<String>> {
        if let Some(selected) = &self.settings.interfaces {
            let mut names: Vec<String> = selected.iter().cloned().collect();
            names.sort();
            return Ok(names);
        }
        list_interfaces(self.sampler.counters()).context("Unable to list network interfaces")
    }

    fn render_cycle(
        &self,
        out: &mut impl Write,
        rows: &[ThroughputSample],
        limit: usize,
        elapsed: f64,
    ) -> Result<()> {
        if self.settings.json {
            let shown = &rows[..limit.min(rows.len())];
            let report = CycleReport {
                timestamp: Utc::now(),
                elapsed_secs: elapsed,
                samples: shown,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
            return Ok(());
        }

        writeln!(out, "\nSample over {:.2}s", elapsed)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        for line in summarize_samples(rows, limit, &self.settings.display) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn render_details(&self, out: &mut impl Write, heading: &str, names: &[String]) -> Result<()> {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let attributes = self.sampler.attributes().read(&refs);

        writeln!(out, "{}", heading)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        for line in detail_lines(&attributes) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// One `name state= mtu= speed=` line per interface, sorted by name
pub fn detail_lines(attributes: &AttributeMap) -> Vec<String> {
    let mut names: Vec<&String> = attributes.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            let details = &attributes[name];
            let mtu = details
                .mtu
                .map_or_else(|| "n/a".to_string(), |mtu| mtu.to_string());
            let speed = details
                .speed_mbps
                .map_or_else(|| "n/a".to_string(), |speed| format!("{}Mb/s", speed));
            let state = details.operstate.as_deref().unwrap_or("n/a");
            format!("{:<12} state={:<8} mtu={:<6} speed={}", name, state, mtu, speed)
        })
        .collect()
}
