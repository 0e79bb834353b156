//! Per-kind acceptance rules.
//!
//! Every observation passes through exactly one of these checks before it
//! may enter history. The checks are pure: they never mutate anything, so a
//! rejection leaves panel state untouched by construction.

use std::time::{Duration, Instant};

use devhud_types::{DebugShape, MemoryReading, NetworkPacket, PerformanceMetric, ShapeGeometry};

use crate::error::ValidationError;

/// Acceptance rules for a performance metric.
///
/// The stamp must fall inside the recency window relative to `now` — a
/// stale stamp means the producer queued the observation through dead time
/// (or a clock is skewed), and the graph must not resurrect it.
pub fn check_metric(
    metric: &PerformanceMetric,
    now: Instant,
    window: Duration,
) -> Result<(), ValidationError> {
    if !metric.value.is_finite() {
        return Err(ValidationError::NonFiniteMetricValue {
            value: metric.value,
        });
    }
    if metric.category.is_empty() {
        return Err(ValidationError::EmptyMetricCategory);
    }
    let age_ms = metric.age_ms(now);
    let window_ms = window.as_millis() as u64;
    if age_ms > window_ms {
        return Err(ValidationError::StaleMetric { age_ms, window_ms });
    }
    Ok(())
}

/// Acceptance rules for a memory reading.
///
/// The three figures must be non-negative, ordered
/// `used <= total <= limit`, and the allocation breakdown must sum to the
/// used heap within `tolerance`.
pub fn check_reading(reading: &MemoryReading, tolerance: f64) -> Result<(), ValidationError> {
    for (field, value) in [
        ("total_heap", reading.total_heap),
        ("used_heap", reading.used_heap),
        ("heap_limit", reading.heap_limit),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidHeapFigure { field, value });
        }
    }
    if reading.used_heap > reading.total_heap {
        return Err(ValidationError::UsedExceedsTotal {
            used: reading.used_heap,
            total: reading.total_heap,
        });
    }
    if reading.total_heap > reading.heap_limit {
        return Err(ValidationError::TotalExceedsLimit {
            total: reading.total_heap,
            limit: reading.heap_limit,
        });
    }
    let sum = reading.allocation_sum();
    if (sum - reading.used_heap).abs() > tolerance {
        return Err(ValidationError::AllocationSumMismatch {
            sum,
            used: reading.used_heap,
            tolerance,
        });
    }
    Ok(())
}

/// Acceptance rules for a debug shape.
///
/// The id must be non-empty, the position finite, and the kind-specific
/// payload well-formed: a finite line end, a finite box size, a positive
/// finite circle radius.
pub fn check_shape(shape: &DebugShape) -> Result<(), ValidationError> {
    if shape.id.is_empty() {
        return Err(ValidationError::EmptyShapeId);
    }
    if !shape.position.is_finite() {
        return Err(ValidationError::NonFinitePosition {
            x: shape.position.x,
            y: shape.position.y,
        });
    }
    match shape.geometry {
        ShapeGeometry::Point => {}
        ShapeGeometry::Line { end } => {
            if !end.is_finite() {
                return Err(ValidationError::NonFiniteLineEnd { x: end.x, y: end.y });
            }
        }
        ShapeGeometry::Box { size } => {
            if !size.is_finite() {
                return Err(ValidationError::NonFiniteBoxSize {
                    w: size.x,
                    h: size.y,
                });
            }
        }
        ShapeGeometry::Circle { radius } => {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ValidationError::InvalidRadius { radius });
            }
        }
    }
    Ok(())
}

/// Acceptance rules for a network packet.
///
/// The id must be non-empty, the timestamp must not lie in the future of
/// `now_ms`, the size must be strictly positive, and a carried latency must
/// be non-negative and finite.
pub fn check_packet(packet: &NetworkPacket, now_ms: u64) -> Result<(), ValidationError> {
    if packet.id.is_empty() {
        return Err(ValidationError::EmptyPacketId);
    }
    if packet.timestamp_ms > now_ms {
        return Err(ValidationError::FuturePacketTimestamp {
            timestamp_ms: packet.timestamp_ms,
            now_ms,
        });
    }
    if packet.size_bytes == 0 {
        return Err(ValidationError::ZeroPacketSize);
    }
    if let Some(latency_ms) = packet.latency_ms {
        if !latency_ms.is_finite() || latency_ms < 0.0 {
            return Err(ValidationError::InvalidLatency { latency_ms });
        }
    }
    Ok(())
}
