//! Error taxonomy for the devhud core.
//!
//! Two classes, with very different contracts:
//!
//! - [`ValidationError`]: malformed or out-of-contract input. The operation
//!   is rejected, no state is mutated, and the caller decides whether to
//!   log, surface, or drop the rejection. Re-invoking with corrected input
//!   is always safe.
//! - [`InvariantViolation`]: a post-condition failed after a supposedly
//!   successful mutation. This indicates a bug in the core, not bad input,
//!   and must propagate to the host rather than being swallowed.

use thiserror::Error;

/// Rejection of malformed or out-of-contract input.
///
/// Each variant identifies the offending field or invariant in its message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Metric stamp is older than the recency window.
    #[error("metric timestamp is {age_ms}ms old, outside the {window_ms}ms recency window")]
    StaleMetric { age_ms: u64, window_ms: u64 },

    /// Metric value is NaN or infinite.
    #[error("metric value must be finite, got {value}")]
    NonFiniteMetricValue { value: f64 },

    /// Metric category label is empty.
    #[error("metric category must not be empty")]
    EmptyMetricCategory,

    /// No memory telemetry provider was injected at construction.
    #[error("no memory telemetry source configured")]
    ProbeUnavailable,

    /// A heap figure is negative or non-finite.
    #[error("memory figure '{field}' must be a non-negative finite number, got {value}")]
    InvalidHeapFigure { field: &'static str, value: f64 },

    /// Used heap exceeds total heap.
    #[error("used heap {used} exceeds total heap {total}")]
    UsedExceedsTotal { used: f64, total: f64 },

    /// Total heap exceeds the heap limit.
    #[error("total heap {total} exceeds heap limit {limit}")]
    TotalExceedsLimit { total: f64, limit: f64 },

    /// Allocation breakdown does not sum to the used heap.
    #[error("allocation sum {sum} does not match used heap {used} (tolerance {tolerance})")]
    AllocationSumMismatch { sum: f64, used: f64, tolerance: f64 },

    /// Shape id is empty.
    #[error("shape id must not be empty")]
    EmptyShapeId,

    /// Shape position has a NaN or infinite coordinate.
    #[error("shape position ({x}, {y}) must have finite coordinates")]
    NonFinitePosition { x: f64, y: f64 },

    /// Line end point has a NaN or infinite coordinate.
    #[error("line end point ({x}, {y}) must have finite coordinates")]
    NonFiniteLineEnd { x: f64, y: f64 },

    /// Box size vector has a NaN or infinite component.
    #[error("box size ({w}, {h}) must have finite components")]
    NonFiniteBoxSize { w: f64, h: f64 },

    /// Circle radius is zero, negative, or non-finite.
    #[error("circle radius must be a positive finite number, got {radius}")]
    InvalidRadius { radius: f64 },

    /// Packet id is empty.
    #[error("packet id must not be empty")]
    EmptyPacketId,

    /// Packet timestamp is in the future.
    #[error("packet timestamp {timestamp_ms} is in the future (now {now_ms})")]
    FuturePacketTimestamp { timestamp_ms: u64, now_ms: u64 },

    /// Packet size is zero.
    #[error("packet size must be strictly positive")]
    ZeroPacketSize,

    /// Packet latency is negative or non-finite.
    #[error("packet latency must be a non-negative finite number, got {latency_ms}")]
    InvalidLatency { latency_ms: f64 },
}

/// A fatal post-condition failure inside the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    /// A bounded buffer holds more entries than its capacity after insert.
    #[error("history buffer holds {len} entries, capacity is {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },

    /// The entry just written to a buffer is missing or altered.
    #[error("entry just written to the {buffer} buffer is missing or altered")]
    LostWrite { buffer: &'static str },
}

/// Top-level error for all core operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HudError {
    /// Input was rejected; no state changed. Recoverable.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// A core post-condition failed after a mutation. Fatal.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl HudError {
    /// Whether this error is the recoverable rejection class.
    pub fn is_rejection(&self) -> bool {
        matches!(self, HudError::Rejected(_))
    }
}
