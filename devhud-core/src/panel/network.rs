//! Network monitor panel.

use devhud_types::{current_timestamp_ms, NetworkPacket, PacketStats};

use crate::aggregate;
use crate::config::HudConfig;
use crate::error::HudError;
use crate::history::BoundedHistory;
use crate::validate;

/// Controller for the packet trace buffer.
///
/// Packets are validated on entry and kept in a bounded FIFO window.
/// Statistics are recomputed from the live buffer on every query so they can
/// never drift from the packets they summarize.
#[derive(Debug)]
pub struct NetworkPanel {
    history: BoundedHistory<NetworkPacket>,
}

impl NetworkPanel {
    /// Create a panel sized per `config`.
    pub fn new(config: &HudConfig) -> Self {
        Self {
            history: BoundedHistory::new(config.packet_capacity),
        }
    }

    /// Validate and append a packet observation.
    pub fn log_packet(&mut self, packet: NetworkPacket) -> Result<(), HudError> {
        validate::check_packet(&packet, current_timestamp_ms())?;
        self.history.push(packet);
        self.history.check_capacity()?;
        Ok(())
    }

    /// Traffic statistics over the current buffer.
    pub fn stats(&self) -> PacketStats {
        aggregate::packet_stats(self.history.iter())
    }

    /// The most recently logged packet.
    pub fn latest(&self) -> Option<&NetworkPacket> {
        self.history.latest()
    }

    /// Packets in insertion order, oldest first.
    pub fn packets(&self) -> Vec<NetworkPacket> {
        self.history.iter().cloned().collect()
    }

    /// Number of packets currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Iterate packets oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkPacket> {
        self.history.iter()
    }

    /// Drop all packets. Idempotent.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use devhud_types::PacketDirection;

    fn panel() -> NetworkPanel {
        NetworkPanel::new(&HudConfig::default())
    }

    #[test]
    fn send_and_receive_totals_are_split() {
        let mut panel = panel();
        panel
            .log_packet(NetworkPacket::new("a", PacketDirection::Send, 100))
            .unwrap();
        panel
            .log_packet(NetworkPacket::new("b", PacketDirection::Receive, 50))
            .unwrap();

        let stats = panel.stats();
        assert_eq!(stats.total_packets, 2);
        assert_eq!(stats.bytes_sent, 100);
        assert_eq!(stats.bytes_received, 50);
    }

    #[test]
    fn future_timestamp_is_rejected_without_state_change() {
        let mut panel = panel();
        let future = NetworkPacket::new("a", PacketDirection::Send, 10)
            .with_timestamp(current_timestamp_ms() + 60_000);

        let err = panel.log_packet(future).unwrap_err();
        assert!(matches!(
            err,
            HudError::Rejected(ValidationError::FuturePacketTimestamp { .. })
        ));
        assert!(panel.is_empty());
    }

    #[test]
    fn zero_size_and_negative_latency_are_rejected() {
        let mut panel = panel();
        assert!(panel
            .log_packet(NetworkPacket::new("a", PacketDirection::Send, 0))
            .is_err());
        assert!(panel
            .log_packet(NetworkPacket::new("b", PacketDirection::Send, 10).with_latency(-5.0))
            .is_err());
        assert!(panel.is_empty());
    }

    #[test]
    fn buffer_never_exceeds_capacity() {
        let mut panel = panel();
        for i in 0..250 {
            panel
                .log_packet(NetworkPacket::new(format!("p{i}"), PacketDirection::Send, 1))
                .unwrap();
        }

        assert_eq!(panel.len(), 100);
        let packets = panel.packets();
        assert_eq!(packets.first().unwrap().id, "p150");
        assert_eq!(packets.last().unwrap().id, "p249");
    }

    #[test]
    fn average_latency_ignores_packets_without_one() {
        let mut panel = panel();
        panel
            .log_packet(NetworkPacket::new("a", PacketDirection::Send, 10).with_latency(10.0))
            .unwrap();
        panel
            .log_packet(NetworkPacket::new("b", PacketDirection::Send, 10))
            .unwrap();
        panel
            .log_packet(NetworkPacket::new("c", PacketDirection::Receive, 10).with_latency(20.0))
            .unwrap();

        assert_eq!(panel.stats().avg_latency_ms, 15.0);
    }

    #[test]
    fn average_latency_is_zero_when_no_packet_carries_one() {
        let mut panel = panel();
        panel
            .log_packet(NetworkPacket::new("a", PacketDirection::Send, 10))
            .unwrap();
        assert_eq!(panel.stats().avg_latency_ms, 0.0);
    }

    #[test]
    fn clear_twice_leaves_the_same_empty_state() {
        let mut panel = panel();
        panel
            .log_packet(NetworkPacket::new("a", PacketDirection::Send, 10))
            .unwrap();
        panel.clear();
        assert!(panel.is_empty());
        assert_eq!(panel.stats(), PacketStats::default());
        panel.clear();
        assert!(panel.is_empty());
    }
}
