//! Rate sampler: two counter reads around a blocking sleep
//!
//! The sampler owns its data sources and nothing else. Each call to
//! [`RateSampler::sample`] takes fresh snapshots and returns fresh samples;
//! no readings are cached between cycles.

use log::{debug, trace, warn};
use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use crate::collectors::bandwidth::errors::MonitorError;
use crate::collectors::bandwidth::stats::{
    AttributeMap, CounterSnapshot, SamplingWindow, ThroughputSample,
};
use crate::collectors::platform::{AttributeSource, CounterSource};

/// Samples per-second throughput for every interface over a fixed interval
#[derive(Debug)]
pub struct RateSampler<C, A> {
    counters: C,
    attributes: A,
}

impl<C: CounterSource, A: AttributeSource> RateSampler<C, A> {
    pub fn new(counters: C, attributes: A) -> Self {
        Self {
            counters,
            attributes,
        }
    }

    pub fn counters(&self) -> &C {
        &self.counters
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Reads counters, sleeps for `interval`, reads again and derives rates
    ///
    /// Returns the samples ordered by total byte rate, highest first, along
    /// with the measured elapsed seconds. `interval` must be positive; the
    /// caller validates it. `filter` restricts the output to the named
    /// interfaces; `None` keeps all of them.
    pub fn sample(
        &self,
        interval: Duration,
        filter: Option<&HashSet<String>>,
    ) -> Result<(Vec<ThroughputSample>, f64), MonitorError> {
        let start = Instant::now();
        let before = self.counters.read()?;

        thread::sleep(interval);

        let after = self.counters.read()?;
        let names: Vec<&str> = after.keys().map(String::as_str).collect();
        let attributes = self.attributes.read(&names);
        let window = SamplingWindow::new(start, Instant::now());
        let elapsed = window.elapsed_secs();

        let samples = compute_samples(&before, &after, &attributes, elapsed, filter);

        debug!(
            "Sampling window complete (requested={:.3}s, elapsed={:.3}s, before={}, after={}, samples={})",
            interval.as_secs_f64(),
            elapsed,
            before.len(),
            after.len(),
            samples.len()
        );

        Ok((samples, elapsed))
    }
}

/// Derives samples from two snapshots taken `elapsed_secs` apart
///
/// Interfaces missing from `before` appeared mid-window and are left out.
/// The result is ordered by total byte rate, highest first, with ties in
/// interface-name order.
pub fn compute_samples(
    before: &CounterSnapshot,
    after: &CounterSnapshot,
    attributes: &AttributeMap,
    elapsed_secs: f64,
    filter: Option<&HashSet<String>>,
) -> Vec<ThroughputSample> {
    let mut samples = Vec::with_capacity(after.len());

    for (name, now) in after {
        if filter.is_some_and(|selected| !selected.contains(name)) {
            continue;
        }
        let Some(prev) = before.get(name) else {
            trace!("Interface '{}' appeared mid-window, skipping", name);
            continue;
        };

        if now.rx_bytes < prev.rx_bytes || now.tx_bytes < prev.tx_bytes {
            warn!(
                "Interface '{}': byte counter decreased (rx: {} -> {}, tx: {} -> {}) - rate floored at zero",
                name, prev.rx_bytes, now.rx_bytes, prev.tx_bytes, now.tx_bytes
            );
        }

        let rate = |before: u64, after: u64| per_second(before, after, elapsed_secs);
        let sample = ThroughputSample {
            name: name.clone(),
            rx_bytes_per_sec: rate(prev.rx_bytes, now.rx_bytes),
            tx_bytes_per_sec: rate(prev.tx_bytes, now.tx_bytes),
            rx_packets_per_sec: rate(prev.rx_packets, now.rx_packets),
            tx_packets_per_sec: rate(prev.tx_packets, now.tx_packets),
            rx_errs_per_sec: rate(prev.rx_errs, now.rx_errs),
            tx_errs_per_sec: rate(prev.tx_errs, now.tx_errs),
            rx_drop_per_sec: rate(prev.rx_drop, now.rx_drop),
            tx_drop_per_sec: rate(prev.tx_drop, now.tx_drop),
            rx_multicast_per_sec: rate(prev.rx_multicast, now.rx_multicast),
            speed_mbps: attributes.get(name).and_then(|attrs| attrs.speed_mbps),
        };

        trace!(
            "Interface '{}': rx={:.2} B/s, tx={:.2} B/s, rx_packets={:.2}/s, tx_packets={:.2}/s",
            name,
            sample.rx_bytes_per_sec,
            sample.tx_bytes_per_sec,
            sample.rx_packets_per_sec,
            sample.tx_packets_per_sec
        );
        samples.push(sample);
    }

    samples.sort_by(|a, b| b.total_bytes_per_sec().total_cmp(&a.total_bytes_per_sec()));
    samples
}

/// Counter delta per second; a decrease (reset or wrap) yields zero
pub fn per_second(before: u64, after: u64, elapsed_secs: f64) -> f64 {
    match after.checked_sub(before) {
        Some(delta) => delta as f64 / elapsed_secs,
        None => 0.0,
    }
}
