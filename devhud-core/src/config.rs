//! Tunable limits for the overlay core.

use std::time::Duration;

use serde::Deserialize;

/// Capacities and tolerances for the four panels.
///
/// The defaults are the contract the panels enforce; hosts that
/// deserialize a config from their own settings source only need to name
/// the fields they change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Maximum performance metrics kept in history.
    pub metric_capacity: usize,
    /// Maximum packets kept in history.
    pub packet_capacity: usize,
    /// Maximum memory snapshots kept in history.
    pub snapshot_capacity: usize,
    /// Maximum age of a metric stamp at acceptance time.
    #[serde(with = "duration_ms")]
    pub recency_window: Duration,
    /// Allowed difference between the allocation sum and the used heap.
    pub allocation_tolerance: f64,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            metric_capacity: 100,
            packet_capacity: 100,
            snapshot_capacity: 100,
            recency_window: Duration::from_millis(1000),
            allocation_tolerance: 0.1,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_panel_contract() {
        let config = HudConfig::default();
        assert_eq!(config.metric_capacity, 100);
        assert_eq!(config.packet_capacity, 100);
        assert_eq!(config.snapshot_capacity, 100);
        assert_eq!(config.recency_window, Duration::from_millis(1000));
        assert_eq!(config.allocation_tolerance, 0.1);
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let config: HudConfig =
            serde_json::from_str(r#"{"metric_capacity": 50, "recency_window": 250}"#).unwrap();
        assert_eq!(config.metric_capacity, 50);
        assert_eq!(config.recency_window, Duration::from_millis(250));
        assert_eq!(config.packet_capacity, 100);
    }
}
