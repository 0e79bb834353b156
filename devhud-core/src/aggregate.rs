//! Derived statistics over live buffer contents.
//!
//! Everything here is a pure function of the entries it is handed, computed
//! on every query. Nothing is cached or incrementally maintained: the
//! buffers are small (capacity 100) and recomputation keeps the numbers
//! impossible to desynchronize from the observations they describe.

use std::collections::BTreeMap;

use devhud_types::{NetworkPacket, PacketDirection, PacketStats, PerformanceMetric};

/// Group metric values into per-category series, insertion order preserved.
pub fn series_by_category<'a>(
    metrics: impl Iterator<Item = &'a PerformanceMetric>,
) -> BTreeMap<String, Vec<f64>> {
    let mut series: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for metric in metrics {
        series.entry(metric.category.clone()).or_default().push(metric.value);
    }
    series
}

/// Compute traffic statistics from the live packet buffer.
///
/// Mean latency covers only packets that carry a latency and is zero when
/// none do.
pub fn packet_stats<'a>(packets: impl Iterator<Item = &'a NetworkPacket>) -> PacketStats {
    let mut stats = PacketStats::default();
    let mut latency_sum = 0.0;
    let mut latency_count = 0usize;

    for packet in packets {
        stats.total_packets += 1;
        match packet.direction {
            PacketDirection::Send => stats.bytes_sent += packet.size_bytes,
            PacketDirection::Receive => stats.bytes_received += packet.size_bytes,
        }
        if let Some(latency) = packet.latency_ms {
            latency_sum += latency;
            latency_count += 1;
        }
    }

    if latency_count > 0 {
        stats.avg_latency_ms = latency_sum / latency_count as f64;
    }
    stats
}

/// Normalize a value series to 0-7 for 8-level bar rendering.
///
/// Returns an empty Vec when the series is too short to show a trend.
pub fn sparkline(values: &[f64]) -> Vec<u8> {
    if values.len() < 2 {
        return Vec::new();
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let range = (max - min).max(f64::EPSILON);

    values
        .iter()
        .map(|&v| {
            let normalized = ((v - min) / range * 7.0) as u8;
            normalized.min(7)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn metric(value: f64, category: &str) -> PerformanceMetric {
        PerformanceMetric::with_timestamp(Instant::now(), value, category)
    }

    #[test]
    fn series_groups_by_category_in_insertion_order() {
        let metrics = vec![
            metric(60.0, "fps"),
            metric(16.2, "frame-ms"),
            metric(59.0, "fps"),
            metric(58.5, "fps"),
        ];

        let series = series_by_category(metrics.iter());
        assert_eq!(series.len(), 2);
        assert_eq!(series["fps"], vec![60.0, 59.0, 58.5]);
        assert_eq!(series["frame-ms"], vec![16.2]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let series = series_by_category(std::iter::empty());
        assert!(series.is_empty());
    }

    #[test]
    fn stats_split_bytes_by_direction() {
        let packets = vec![
            NetworkPacket::new("a", PacketDirection::Send, 100).with_timestamp(1),
            NetworkPacket::new("b", PacketDirection::Receive, 50).with_timestamp(2),
        ];

        let stats = packet_stats(packets.iter());
        assert_eq!(stats.total_packets, 2);
        assert_eq!(stats.bytes_sent, 100);
        assert_eq!(stats.bytes_received, 50);
    }

    #[test]
    fn mean_latency_covers_only_carriers() {
        let packets = vec![
            NetworkPacket::new("a", PacketDirection::Send, 10)
                .with_timestamp(1)
                .with_latency(10.0),
            NetworkPacket::new("b", PacketDirection::Send, 10).with_timestamp(2),
            NetworkPacket::new("c", PacketDirection::Receive, 10)
                .with_timestamp(3)
                .with_latency(30.0),
        ];

        let stats = packet_stats(packets.iter());
        assert_eq!(stats.avg_latency_ms, 20.0);
    }

    #[test]
    fn mean_latency_is_zero_without_carriers() {
        let packets =
            vec![NetworkPacket::new("a", PacketDirection::Send, 10).with_timestamp(1)];
        let stats = packet_stats(packets.iter());
        assert_eq!(stats.avg_latency_ms, 0.0);
    }

    #[test]
    fn empty_buffer_yields_default_stats() {
        let stats = packet_stats(std::iter::empty());
        assert_eq!(stats, PacketStats::default());
    }

    #[test]
    fn sparkline_normalizes_to_bar_levels() {
        let bars = sparkline(&[0.0, 3.5, 7.0]);
        assert_eq!(bars, vec![0, 3, 7]);
    }

    #[test]
    fn sparkline_of_flat_series_is_all_zero() {
        let bars = sparkline(&[5.0, 5.0, 5.0]);
        assert_eq!(bars, vec![0, 0, 0]);
    }

    #[test]
    fn sparkline_needs_two_points() {
        assert!(sparkline(&[]).is_empty());
        assert!(sparkline(&[1.0]).is_empty());
    }
}
