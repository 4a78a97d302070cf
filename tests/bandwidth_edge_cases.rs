use netrate::collectors::bandwidth::{MonitorError, RateUnit, ThroughputSample, format_rate};
use netrate::collectors::{CounterSource, ProcNetDev, RateSampler, SysfsAttributes};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

const HEADER: &str = "Inter-|   Receive                                                |  Transmit\n \
face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n";

fn write_table(path: &Path, rows: &[(&str, u64, u64)]) {
    let mut content = HEADER.to_string();
    for (name, rx, tx) in rows {
        content.push_str(&format!(
            "{:>6}: {:>8} 10 0 0 0 0 0 0 {:>8} 10 0 0 0 0 0 0\n",
            name, rx, tx
        ));
    }
    fs::write(path, content).unwrap();
}

fn write_attr(root: &Path, name: &str, attribute: &str, value: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(attribute), value).unwrap();
}

/// Rewrites the counter table while the sampler sleeps
fn sample_with_rewrite(
    before: &[(&str, u64, u64)],
    after: &'static [(&'static str, u64, u64)],
) -> (Vec<ThroughputSample>, f64) {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("dev");
    let sysfs = dir.path().join("net");
    fs::create_dir_all(&sysfs).unwrap();
    write_attr(&sysfs, "eth0", "speed", "1000\n");
    write_table(&table, before);

    let sampler = RateSampler::new(
        ProcNetDev::with_path(&table),
        SysfsAttributes::with_root(&sysfs),
    );

    let writer_path = table.clone();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        write_table(&writer_path, after);
    });

    let result = sampler
        .sample(Duration::from_millis(400), None)
        .expect("sampling should succeed");
    writer.join().unwrap();
    result
}

#[test]
fn test_real_files_yield_rates_over_measured_time() {
    let (samples, elapsed) = sample_with_rewrite(
        &[("eth0", 1000, 0), ("lo", 0, 0)],
        &[("eth0", 1_001_024, 2048), ("lo", 512, 512)],
    );

    assert!(elapsed >= 0.4);
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].name, "eth0");
    assert_eq!(samples[0].speed_mbps, Some(1000));
    assert!((samples[0].rx_bytes_per_sec - 1_000_024.0 / elapsed).abs() < 1e-6);
    assert!((samples[0].tx_bytes_per_sec - 2048.0 / elapsed).abs() < 1e-6);
    assert_eq!(samples[1].name, "lo");
    assert_eq!(samples[1].speed_mbps, None);
}

#[test]
fn test_interface_reset_between_reads_reports_zero() {
    let (samples, _) =
        sample_with_rewrite(&[("eth0", 5_000_000, 9_000)], &[("eth0", 100, 9_500)]);

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].rx_bytes_per_sec, 0.0);
    assert!(samples[0].tx_bytes_per_sec > 0.0);
}

#[test]
fn test_hot_plugged_interface_between_reads_is_absent() {
    let (samples, _) = sample_with_rewrite(
        &[("eth0", 0, 0)],
        &[("eth0", 10, 10), ("veth9", 99_999, 99_999)],
    );

    let names: Vec<&str> = samples.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["eth0"]);
}

#[test]
fn test_missing_counter_table_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let sampler = RateSampler::new(
        ProcNetDev::with_path(dir.path().join("nope")),
        SysfsAttributes::with_root(dir.path()),
    );

    let err = sampler.sample(Duration::from_millis(1), None).unwrap_err();
    assert!(matches!(err, MonitorError::SourceUnavailable { .. }));
}

#[test]
fn test_ragged_table_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("dev");
    let content = format!(
        "{}  eth0: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16\n  old0: 1 2 3 4 5 6 7 8\ngarbage\n",
        HEADER
    );
    fs::write(&table, content).unwrap();

    let snapshot = ProcNetDev::with_path(&table).read().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot["eth0"].tx_bytes, 9);
}

#[test]
fn test_large_rates_stay_within_ladder() {
    assert_eq!(format_rate(1_073_741_824.0, RateUnit::Bytes), "  1.00 GB/s");
    assert_eq!(format_rate(1023.0, RateUnit::Bytes), "1023.00 B/s");
    assert_eq!(format_rate(1_073_741_824.0, RateUnit::Bits), "  8.00 Gb/s");
}
