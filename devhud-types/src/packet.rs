//! Network packet observations and derived traffic statistics.

use crate::time::current_timestamp_ms;

/// Direction of a logged packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PacketDirection {
    Send,
    Receive,
}

impl PacketDirection {
    /// Returns the wire label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            PacketDirection::Send => "send",
            PacketDirection::Receive => "receive",
        }
    }
}

/// A single packet observation from the host's network layer.
///
/// Immutable once created. The devhud core rejects packets with an empty id,
/// a timestamp in the future, a zero size, or a negative latency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkPacket {
    /// Caller-supplied identifier.
    pub id: String,
    /// Unix timestamp in milliseconds when the packet was observed.
    pub timestamp_ms: u64,
    /// Whether the packet was sent or received.
    pub direction: PacketDirection,
    /// Payload size in bytes. Must be strictly positive.
    pub size_bytes: u64,
    /// Round-trip latency in milliseconds, when the host measured one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub latency_ms: Option<f64>,
}

impl NetworkPacket {
    /// Create a packet stamped with the current wall-clock time.
    pub fn new(id: impl Into<String>, direction: PacketDirection, size_bytes: u64) -> Self {
        Self {
            id: id.into(),
            timestamp_ms: current_timestamp_ms(),
            direction,
            size_bytes,
            latency_ms: None,
        }
    }

    /// Set a specific observation timestamp.
    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Attach a measured latency.
    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

/// Traffic statistics derived from the live packet buffer.
///
/// Always recomputed from current buffer contents on query; never maintained
/// incrementally, so the numbers cannot drift from the packets they describe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketStats {
    /// Number of packets currently in the buffer.
    pub total_packets: usize,
    /// Mean latency in milliseconds over packets that carry one.
    ///
    /// Zero when no packet in the buffer carries a latency.
    pub avg_latency_ms: f64,
    /// Total bytes across sent packets.
    pub bytes_sent: u64,
    /// Total bytes across received packets.
    pub bytes_received: u64,
}
