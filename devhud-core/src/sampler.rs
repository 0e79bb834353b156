//! Periodic snapshot sampling.
//!
//! The memory viewer refreshes itself by asking the bus for a snapshot at a
//! fixed cadence. The sampler is the only place the core touches an async
//! runtime; everything it does goes through the same validated bus entry
//! point as any other producer.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error};

use crate::bus::HudEvent;
use crate::hub::DebugHud;

/// Handle for controlling a running sampler.
///
/// Call [`SamplerHandle::stop`] to end emission; dropping the handle without
/// stopping leaves the sampler running for the lifetime of the runtime.
pub struct SamplerHandle {
    stop_tx: watch::Sender<bool>,
}

impl SamplerHandle {
    /// Stop the sampler.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}

impl DebugHud {
    /// Spawn a task that emits a snapshot request every `interval`.
    ///
    /// Rejections (for example a hub without a probe) are logged by the bus
    /// and sampling continues; an invariant violation aborts the sampler,
    /// since the core is no longer trustworthy.
    pub fn start_sampler(&self, interval: Duration) -> SamplerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let hud = self.clone();

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            let mut stop_rx = stop_rx;

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        if let Err(violation) = hud.emit(&HudEvent::SnapshotRequest) {
                            error!(%violation, "sampler stopping on fatal violation");
                            break;
                        }
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            debug!("sampler stopped");
                            break;
                        }
                    }
                }
            }
        });

        SamplerHandle { stop_tx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::testing::FixedProbe;

    #[tokio::test(start_paused = true)]
    async fn sampler_captures_snapshots_at_the_cadence() {
        let hud = DebugHud::builder().memory_probe(FixedProbe::healthy()).build();
        let handle = hud.start_sampler(Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(hud.latest_snapshot().is_some());
        assert!(hud.snapshot_count() >= 3);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_emission() {
        let hud = DebugHud::builder().memory_probe(FixedProbe::healthy()).build();
        let handle = hud.start_sampler(Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.stop();
        // Let the stop signal land before measuring.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let settled = hud.snapshot_count();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hud.snapshot_count(), settled);
    }

    #[tokio::test(start_paused = true)]
    async fn sampler_without_probe_keeps_running() {
        let hud = DebugHud::new();
        let handle = hud.start_sampler(Duration::from_millis(100));

        // Every request is rejected, none are fatal.
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(hud.snapshot_count(), 0);

        handle.stop();
    }
}
