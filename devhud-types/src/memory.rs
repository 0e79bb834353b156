//! Memory telemetry readings and accepted snapshots.

use std::collections::BTreeMap;

use crate::time::current_timestamp_ms;

/// Raw memory figures produced by a host-injected telemetry provider.
///
/// A reading is what the memory probe hands to the devhud core; it becomes a
/// [`MemorySnapshot`] only after the core has checked its invariants
/// (`used <= total <= limit`, allocation values sum to `used` within
/// tolerance). All magnitudes are in the host's unit of choice, typically
/// bytes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryReading {
    /// Total heap currently reserved.
    pub total_heap: f64,
    /// Heap currently in use. Must not exceed `total_heap`.
    pub used_heap: f64,
    /// Upper bound the allocator will grow to. Must not be below `total_heap`.
    pub heap_limit: f64,
    /// Per-subsystem breakdown of `used_heap`, keyed by subsystem label.
    pub allocation: BTreeMap<String, f64>,
}

impl MemoryReading {
    /// Create a builder for a reading.
    pub fn builder() -> MemoryReadingBuilder {
        MemoryReadingBuilder::new()
    }

    /// Sum of all per-subsystem allocation values.
    pub fn allocation_sum(&self) -> f64 {
        self.allocation.values().sum()
    }
}

/// Builder for [`MemoryReading`].
#[derive(Debug, Default)]
pub struct MemoryReadingBuilder {
    total_heap: f64,
    used_heap: f64,
    heap_limit: f64,
    allocation: BTreeMap<String, f64>,
}

impl MemoryReadingBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total heap size.
    pub fn total_heap(mut self, total: f64) -> Self {
        self.total_heap = total;
        self
    }

    /// Set the used heap size.
    pub fn used_heap(mut self, used: f64) -> Self {
        self.used_heap = used;
        self
    }

    /// Set the heap size limit.
    pub fn heap_limit(mut self, limit: f64) -> Self {
        self.heap_limit = limit;
        self
    }

    /// Add a per-subsystem allocation entry.
    pub fn allocation(mut self, subsystem: impl Into<String>, amount: f64) -> Self {
        self.allocation.insert(subsystem.into(), amount);
        self
    }

    /// Build the reading.
    pub fn build(self) -> MemoryReading {
        MemoryReading {
            total_heap: self.total_heap,
            used_heap: self.used_heap,
            heap_limit: self.heap_limit,
            allocation: self.allocation,
        }
    }
}

/// A memory reading accepted into history, stamped at capture time.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemorySnapshot {
    /// Unix timestamp in milliseconds when the snapshot was captured.
    pub captured_at_ms: u64,
    /// The validated figures.
    pub reading: MemoryReading,
}

impl MemorySnapshot {
    /// Stamp a reading with the current wall-clock time.
    pub fn now(reading: MemoryReading) -> Self {
        Self {
            captured_at_ms: current_timestamp_ms(),
            reading,
        }
    }

    /// Stamp a reading with a specific timestamp.
    pub fn with_timestamp(captured_at_ms: u64, reading: MemoryReading) -> Self {
        Self {
            captured_at_ms,
            reading,
        }
    }
}
