//! Memory viewer panel.

use devhud_types::{current_timestamp_ms, MemorySnapshot};

use crate::config::HudConfig;
use crate::error::HudError;
use crate::history::BoundedHistory;
use crate::probe::MemoryProbe;
use crate::validate;

/// Controller for memory snapshot capture and history.
///
/// Snapshots come from a host-injected [`MemoryProbe`]; a reading becomes
/// history only after the heap-ordering and allocation-sum invariants hold.
/// History is a bounded FIFO window like every other buffer (capacity from
/// [`HudConfig::snapshot_capacity`]); the viewer renders the latest entry.
#[derive(Debug)]
pub struct MemoryPanel {
    history: BoundedHistory<MemorySnapshot>,
    probe: Option<Box<dyn MemoryProbe>>,
    tolerance: f64,
}

impl MemoryPanel {
    /// Create a panel sized per `config`, with an optional probe.
    pub fn new(config: &HudConfig, probe: Option<Box<dyn MemoryProbe>>) -> Self {
        Self {
            history: BoundedHistory::new(config.snapshot_capacity),
            probe,
            tolerance: config.allocation_tolerance,
        }
    }

    /// Whether a telemetry source was injected.
    pub fn has_probe(&self) -> bool {
        self.probe.is_some()
    }

    /// Capture a snapshot from the probe, validate it, append to history.
    ///
    /// Rejects with [`crate::ValidationError::ProbeUnavailable`] when no
    /// probe was injected, and with a specific invariant message when the
    /// reading is inconsistent; neither mutates history.
    pub fn take_snapshot(&mut self) -> Result<(), HudError> {
        let probe = self
            .probe
            .as_mut()
            .ok_or(crate::error::ValidationError::ProbeUnavailable)?;
        let reading = probe.read();
        validate::check_reading(&reading, self.tolerance)?;

        self.history
            .push(MemorySnapshot::with_timestamp(current_timestamp_ms(), reading));
        self.history.check_capacity()?;
        Ok(())
    }

    /// The most recently accepted snapshot.
    pub fn latest(&self) -> Option<&MemorySnapshot> {
        self.history.latest()
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether any snapshot has been accepted.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Iterate snapshots oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &MemorySnapshot> {
        self.history.iter()
    }

    /// Drop all snapshots. Idempotent.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::probe::testing::FixedProbe;
    use devhud_types::MemoryReading;

    fn panel_with(probe: FixedProbe) -> MemoryPanel {
        MemoryPanel::new(&HudConfig::default(), Some(Box::new(probe)))
    }

    #[test]
    fn valid_reading_is_accepted_and_stamped() {
        let mut panel = panel_with(FixedProbe::healthy());
        panel.take_snapshot().unwrap();

        let snapshot = panel.latest().unwrap();
        assert!(snapshot.captured_at_ms > 0);
        assert_eq!(snapshot.reading.used_heap, 512.0);
    }

    #[test]
    fn missing_probe_is_a_rejection() {
        let mut panel = MemoryPanel::new(&HudConfig::default(), None);
        let err = panel.take_snapshot().unwrap_err();
        assert_eq!(
            err,
            HudError::Rejected(ValidationError::ProbeUnavailable)
        );
        assert!(panel.is_empty());
    }

    #[test]
    fn inconsistent_reading_is_rejected_without_state_change() {
        let bad = MemoryReading::builder()
            .total_heap(100.0)
            .used_heap(200.0)
            .heap_limit(400.0)
            .allocation("all", 200.0)
            .build();
        let mut panel = panel_with(FixedProbe::new(bad));

        let err = panel.take_snapshot().unwrap_err();
        assert!(matches!(
            err,
            HudError::Rejected(ValidationError::UsedExceedsTotal { .. })
        ));
        assert!(panel.is_empty());
        assert!(panel.latest().is_none());
    }

    #[test]
    fn allocation_mismatch_identifies_the_invariant() {
        let bad = MemoryReading::builder()
            .total_heap(1000.0)
            .used_heap(500.0)
            .heap_limit(2000.0)
            .allocation("renderer", 100.0)
            .build();
        let mut panel = panel_with(FixedProbe::new(bad));

        let err = panel.take_snapshot().unwrap_err();
        assert!(err.to_string().contains("allocation sum"));
    }

    #[test]
    fn history_is_bounded() {
        let config = HudConfig {
            snapshot_capacity: 3,
            ..HudConfig::default()
        };
        let mut panel = MemoryPanel::new(&config, Some(Box::new(FixedProbe::healthy())));

        for _ in 0..10 {
            panel.take_snapshot().unwrap();
        }
        assert_eq!(panel.len(), 3);
    }

    #[test]
    fn clear_twice_leaves_the_same_empty_state() {
        let mut panel = panel_with(FixedProbe::healthy());
        panel.take_snapshot().unwrap();
        panel.clear();
        assert!(panel.is_empty());
        panel.clear();
        assert!(panel.is_empty());
    }
}
