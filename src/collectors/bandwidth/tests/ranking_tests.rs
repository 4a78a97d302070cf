//! Tests for ranking and aggregation

#[cfg(test)]
mod tests {
    use crate::collectors::bandwidth::ranking::{SortMode, aggregate_samples, sort_samples};
    use crate::collectors::bandwidth::stats::ThroughputSample;

    fn sample(name: &str, rx: f64, tx: f64, rx_pkts: f64, tx_pkts: f64) -> ThroughputSample {
        ThroughputSample {
            rx_bytes_per_sec: rx,
            tx_bytes_per_sec: tx,
            rx_packets_per_sec: rx_pkts,
            tx_packets_per_sec: tx_pkts,
            ..ThroughputSample::zeroed(name)
        }
    }

    fn create_test_samples() -> Vec<ThroughputSample> {
        vec![
            sample("eth0", 100.0, 900.0, 5.0, 1.0),
            sample("wlan0", 700.0, 100.0, 1.0, 9.0),
            sample("lo", 300.0, 300.0, 9.0, 5.0),
            sample("wg0", 900.0, 0.0, 3.0, 3.0),
        ]
    }

    fn names(samples: &[ThroughputSample]) -> Vec<&str> {
        samples.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_each_mode_is_descending() {
        let cases = [
            (SortMode::Total, vec!["eth0", "wg0", "wlan0", "lo"]),
            (SortMode::Rx, vec!["wg0", "wlan0", "lo", "eth0"]),
            (SortMode::Tx, vec!["eth0", "lo", "wlan0", "wg0"]),
            (SortMode::RxPackets, vec!["lo", "eth0", "wg0", "wlan0"]),
            (SortMode::TxPackets, vec!["wlan0", "lo", "wg0", "eth0"]),
        ];
        for (mode, expected) in cases {
            let sorted = sort_samples(create_test_samples(), mode);
            assert_eq!(names(&sorted), expected, "mode {}", mode);
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let samples = vec![
            sample("first", 10.0, 0.0, 1.0, 1.0),
            sample("second", 0.0, 10.0, 1.0, 1.0),
            sample("top", 50.0, 0.0, 2.0, 2.0),
            sample("third", 5.0, 5.0, 1.0, 1.0),
        ];

        let by_total = sort_samples(samples.clone(), SortMode::Total);
        assert_eq!(names(&by_total), vec!["top", "first", "second", "third"]);

        let by_packets = sort_samples(samples, SortMode::TxPackets);
        assert_eq!(names(&by_packets), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_every_mode_keeps_input_order_on_ties() {
        // "b" and "c" tie with "a" only on the key of the mode under test
        let cases = [
            (
                SortMode::Rx,
                vec![
                    sample("a", 10.0, 1.0, 0.0, 0.0),
                    sample("b", 10.0, 9.0, 0.0, 0.0),
                    sample("c", 10.0, 5.0, 0.0, 0.0),
                ],
            ),
            (
                SortMode::Tx,
                vec![
                    sample("a", 1.0, 10.0, 0.0, 0.0),
                    sample("b", 9.0, 10.0, 0.0, 0.0),
                    sample("c", 5.0, 10.0, 0.0, 0.0),
                ],
            ),
            (
                SortMode::RxPackets,
                vec![
                    sample("a", 0.0, 0.0, 4.0, 1.0),
                    sample("b", 9.0, 0.0, 4.0, 9.0),
                    sample("c", 5.0, 0.0, 4.0, 5.0),
                ],
            ),
        ];

        for (mode, samples) in cases {
            let mut input = samples;
            input.insert(1, sample("low", 0.0, 0.0, 0.0, 0.0));
            let sorted = sort_samples(input, mode);
            assert_eq!(names(&sorted), vec!["a", "b", "c", "low"], "mode {}", mode);
        }
    }

    #[test]
    fn test_sort_empty_input() {
        assert!(sort_samples(Vec::new(), SortMode::Rx).is_empty());
    }

    #[test]
    fn test_aggregate_sums_every_field() {
        let mut samples = create_test_samples();
        for (i, s) in samples.iter_mut().enumerate() {
            let i = i as f64;
            s.rx_errs_per_sec = i;
            s.tx_errs_per_sec = 2.0 * i;
            s.rx_drop_per_sec = 3.0 * i;
            s.tx_drop_per_sec = 4.0 * i;
            s.rx_multicast_per_sec = 0.5 * i;
            s.speed_mbps = Some(1000);
        }

        let total = aggregate_samples(&samples);
        assert_eq!(total.name, "TOTAL");
        assert_eq!(total.rx_bytes_per_sec, 2000.0);
        assert_eq!(total.tx_bytes_per_sec, 1300.0);
        assert_eq!(total.rx_packets_per_sec, 18.0);
        assert_eq!(total.tx_packets_per_sec, 18.0);
        assert_eq!(total.rx_errs_per_sec, 6.0);
        assert_eq!(total.tx_errs_per_sec, 12.0);
        assert_eq!(total.rx_drop_per_sec, 18.0);
        assert_eq!(total.tx_drop_per_sec, 24.0);
        assert_eq!(total.rx_multicast_per_sec, 3.0);
        // Heterogeneous link speeds are never summed
        assert_eq!(total.speed_mbps, None);
    }

    #[test]
    fn test_aggregate_leaves_inputs_untouched() {
        let samples = create_test_samples();
        let snapshot = samples.clone();

        let _total = aggregate_samples(&samples);
        assert_eq!(samples, snapshot);
    }
}
