//! Performance metric observations.

use std::time::Instant;

/// A single performance observation from the host application.
///
/// Metrics are stamped with a monotonic [`Instant`] at creation and grouped
/// by a caller-supplied category label (e.g. `"fps"`, `"frame-ms"`). The
/// devhud core rejects metrics whose stamp has aged past its recency window,
/// so producers that queue observations should construct the metric at the
/// moment of measurement, not at the moment of emission.
///
/// A metric is immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetric {
    /// When the observation was taken (monotonic).
    pub recorded_at: Instant,
    /// The observed value.
    pub value: f64,
    /// Category label used to group metrics into series.
    pub category: String,
}

impl PerformanceMetric {
    /// Create a metric stamped with the current instant.
    pub fn new(value: f64, category: impl Into<String>) -> Self {
        Self::with_timestamp(Instant::now(), value, category)
    }

    /// Create a metric with a specific stamp.
    ///
    /// Useful for producers that measured earlier and emit later, and for
    /// exercising the recency check in tests.
    pub fn with_timestamp(recorded_at: Instant, value: f64, category: impl Into<String>) -> Self {
        Self {
            recorded_at,
            value,
            category: category.into(),
        }
    }

    /// Age of this observation relative to `now`, in milliseconds.
    ///
    /// Returns 0 for stamps in the future of `now` (monotonic clocks on some
    /// platforms can disagree slightly across threads).
    pub fn age_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.recorded_at).as_millis() as u64
    }
}
