//! Performance graphs panel.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use devhud_types::PerformanceMetric;

use crate::aggregate;
use crate::config::HudConfig;
use crate::error::{HudError, InvariantViolation};
use crate::history::BoundedHistory;
use crate::panel::Visibility;
use crate::validate;

/// Controller for the shared performance-metric history.
///
/// All categories share one bounded buffer; per-category series are derived
/// on query. Acceptance applies the recency window, and every insert is
/// followed by a readback of the just-written entry — a mismatch there is a
/// non-deterministic eviction bug and surfaces as a fatal
/// [`InvariantViolation`], never a silent drop.
#[derive(Debug)]
pub struct MetricsPanel {
    history: BoundedHistory<PerformanceMetric>,
    window: Duration,
    visibility: Visibility,
}

impl MetricsPanel {
    /// Create a panel sized per `config`.
    pub fn new(config: &HudConfig) -> Self {
        Self {
            history: BoundedHistory::new(config.metric_capacity),
            window: config.recency_window,
            visibility: Visibility::default(),
        }
    }

    /// Record an observation stamped with the current instant.
    pub fn add_metric(&mut self, value: f64, category: impl Into<String>) -> Result<(), HudError> {
        self.ingest(PerformanceMetric::new(value, category))
    }

    /// Validate and append a metric observation.
    pub fn ingest(&mut self, metric: PerformanceMetric) -> Result<(), HudError> {
        validate::check_metric(&metric, Instant::now(), self.window)?;

        let expected = metric.clone();
        self.history.push(metric);
        self.history.check_capacity()?;

        // Readback: the entry we just wrote must be the newest one, intact.
        match self.history.latest() {
            Some(stored) if stored.value == expected.value && stored.category == expected.category => {}
            _ => return Err(InvariantViolation::LostWrite { buffer: "metrics" }.into()),
        }
        Ok(())
    }

    /// Per-category value series, in insertion order.
    pub fn series(&self) -> BTreeMap<String, Vec<f64>> {
        aggregate::series_by_category(self.history.iter())
    }

    /// 0-7 bar levels for one category's series.
    pub fn sparkline(&self, category: &str) -> Vec<u8> {
        let values: Vec<f64> = self
            .history
            .iter()
            .filter(|m| m.category == category)
            .map(|m| m.value)
            .collect();
        aggregate::sparkline(&values)
    }

    /// The most recently accepted observation.
    pub fn latest(&self) -> Option<&PerformanceMetric> {
        self.history.latest()
    }

    /// Number of observations currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Iterate observations oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PerformanceMetric> {
        self.history.iter()
    }

    /// Drop all observations. Idempotent.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Current visibility flag.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Flip visibility.
    pub fn toggle(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    /// Make the graphs visible.
    pub fn show(&mut self) {
        self.visibility = Visibility::Visible;
    }

    /// Hide the graphs.
    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn panel() -> MetricsPanel {
        MetricsPanel::new(&HudConfig::default())
    }

    #[test]
    fn accepted_metric_appears_in_series() {
        let mut panel = panel();
        panel.add_metric(60.0, "fps").unwrap();
        panel.add_metric(59.0, "fps").unwrap();
        panel.add_metric(16.6, "frame-ms").unwrap();

        let series = panel.series();
        assert_eq!(series["fps"], vec![60.0, 59.0]);
        assert_eq!(series["frame-ms"], vec![16.6]);
        assert_eq!(panel.latest().unwrap().value, 16.6);
    }

    #[test]
    fn stale_metric_is_rejected_and_absent_from_queries() {
        let mut panel = panel();
        let stale = PerformanceMetric::with_timestamp(
            Instant::now() - Duration::from_millis(2000),
            42.0,
            "fps",
        );

        let err = panel.ingest(stale).unwrap_err();
        assert!(matches!(
            err,
            HudError::Rejected(ValidationError::StaleMetric { .. })
        ));
        assert!(panel.is_empty());
        assert!(panel.series().is_empty());
    }

    #[test]
    fn buffer_never_exceeds_capacity_and_keeps_newest() {
        let mut panel = panel();
        for i in 0..250 {
            panel.add_metric(i as f64, "fps").unwrap();
        }

        assert_eq!(panel.len(), 100);
        let values = &panel.series()["fps"];
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 150.0);
        assert_eq!(values[99], 249.0);
    }

    #[test]
    fn nan_value_is_rejected_without_state_change() {
        let mut panel = panel();
        panel.add_metric(1.0, "fps").unwrap();
        assert!(panel.add_metric(f64::NAN, "fps").is_err());
        assert_eq!(panel.len(), 1);
    }

    #[test]
    fn clear_twice_leaves_the_same_empty_state() {
        let mut panel = panel();
        panel.add_metric(1.0, "fps").unwrap();
        panel.clear();
        assert!(panel.is_empty());
        panel.clear();
        assert!(panel.is_empty());
    }

    #[test]
    fn visibility_starts_hidden_and_toggles() {
        let mut panel = panel();
        assert_eq!(panel.visibility(), Visibility::Hidden);
        panel.toggle();
        assert_eq!(panel.visibility(), Visibility::Visible);
        panel.hide();
        assert_eq!(panel.visibility(), Visibility::Hidden);
        panel.show();
        assert!(panel.visibility().is_visible());
    }

    #[test]
    fn sparkline_tracks_one_category() {
        let mut panel = panel();
        panel.add_metric(0.0, "fps").unwrap();
        panel.add_metric(10.0, "other").unwrap();
        panel.add_metric(7.0, "fps").unwrap();

        assert_eq!(panel.sparkline("fps"), vec![0, 7]);
        assert!(panel.sparkline("missing").is_empty());
    }
}
