//! Aggregate export schema — a serialized view of current overlay state.
//!
//! The export is assembled by the devhud core from the live buffers at the
//! moment of the call; it is a diagnostic artifact for external consumers,
//! not a persistence format.

use std::collections::BTreeMap;

use crate::memory::MemorySnapshot;
use crate::packet::{NetworkPacket, PacketStats};
use crate::shape::DebugShape;
use crate::SCHEMA_VERSION;

/// The latest accepted metric, flattened for export.
///
/// Monotonic stamps do not serialize meaningfully, so the export carries the
/// observation's age at export time instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricExport {
    /// Milliseconds between the observation and the export.
    pub age_ms: u64,
    pub value: f64,
    pub category: String,
}

/// Exported state of the performance graphs panel.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsExport {
    /// Visibility flag consumed by the render layer.
    pub visible: bool,
    /// Per-category value series in insertion order.
    pub series: BTreeMap<String, Vec<f64>>,
    /// The most recently accepted observation, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub latest: Option<MetricExport>,
}

/// Exported state of the visual overlay panel.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayExport {
    /// Visibility flag consumed by the render layer.
    pub visible: bool,
    /// All registered shapes, ordered by id.
    pub shapes: Vec<DebugShape>,
}

/// Exported state of the network monitor panel.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkExport {
    /// Statistics derived from the live buffer.
    pub stats: PacketStats,
    /// The most recently logged packet, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub latest: Option<NetworkPacket>,
}

/// A point-in-time export of all four panels' aggregate state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateExport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// Unix timestamp in milliseconds when the export was assembled.
    pub generated_at_ms: u64,
    pub metrics: MetricsExport,
    /// The most recent accepted memory snapshot, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub memory: Option<MemorySnapshot>,
    pub overlay: OverlayExport,
    pub network: NetworkExport,
}

impl AggregateExport {
    /// Create an empty export stamped with the given time.
    pub fn new(generated_at_ms: u64) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at_ms,
            metrics: MetricsExport::default(),
            memory: None,
            overlay: OverlayExport::default(),
            network: NetworkExport::default(),
        }
    }
}
