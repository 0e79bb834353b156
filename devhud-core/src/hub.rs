//! The overlay hub: bus plus panels, wired at construction.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use devhud_types::{
    current_timestamp_ms, AggregateExport, DebugShape, MemorySnapshot, MetricExport,
    NetworkPacket, PacketStats, PerformanceMetric,
};

use crate::bus::{Dispatch, EventBus, EventKind, HudEvent};
use crate::config::HudConfig;
use crate::error::{HudError, InvariantViolation};
use crate::panel::{MemoryPanel, MetricsPanel, NetworkPanel, OverlayPanel};
use crate::probe::MemoryProbe;
use crate::render::{NullRenderHook, PanelId, RenderHook};

/// The devhud entry point.
///
/// A hub owns the event bus and the four panel controllers and is handed
/// explicitly to every producer that needs it — there is no process-wide
/// instance, so tests and multi-window hosts can run as many independent
/// hubs as they like.
///
/// Producers feed observations through [`DebugHud::emit`] (or the
/// convenience wrappers); the render layer reads back through the query
/// methods. All state lives behind locks, so a hub can be cloned cheaply
/// and shared across threads; dispatch remains serialized per hub.
///
/// # Example
///
/// ```rust
/// use devhud_core::DebugHud;
/// use devhud_types::{DebugShape, Point};
///
/// let hud = DebugHud::new();
/// hud.add_metric(60.0, "fps").unwrap();
/// hud.add_shape(DebugShape::circle("cursor", Point::new(10.0, 20.0), 4.0)).unwrap();
///
/// assert_eq!(hud.series()["fps"], vec![60.0]);
/// assert_eq!(hud.shapes().len(), 1);
/// ```
#[derive(Clone)]
pub struct DebugHud {
    bus: Arc<Mutex<EventBus>>,
    metrics: Arc<Mutex<MetricsPanel>>,
    memory: Arc<Mutex<MemoryPanel>>,
    overlay: Arc<Mutex<OverlayPanel>>,
    network: Arc<Mutex<NetworkPanel>>,
}

impl DebugHud {
    /// Create a hub with default config, no memory probe, and no render hook.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for configuring the hub.
    pub fn builder() -> DebugHudBuilder {
        DebugHudBuilder::new()
    }

    /// Dispatch one ingestion event to the interested panel.
    ///
    /// Returns the dispatch report; an `Err` is a fatal core bug, not a
    /// rejected observation.
    pub fn emit(&self, event: &HudEvent) -> Result<Dispatch, InvariantViolation> {
        self.bus.lock().emit(event)
    }

    // ------------------------------------------------------------------
    // Convenience ingestion (event construction + emit + single outcome)
    // ------------------------------------------------------------------

    /// Record a performance metric stamped now.
    pub fn add_metric(&self, value: f64, category: impl Into<String>) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::Metric(PerformanceMetric::new(value, category))))
    }

    /// Ask the memory panel to capture a snapshot from its probe.
    pub fn take_snapshot(&self) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::SnapshotRequest))
    }

    /// Insert or overwrite a debug shape.
    pub fn add_shape(&self, shape: DebugShape) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::ShapeAdd(shape)))
    }

    /// Remove a shape by id; absent ids are a no-op.
    pub fn remove_shape(&self, id: impl Into<String>) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::ShapeRemove { id: id.into() }))
    }

    /// Empty the shape registry.
    pub fn clear_shapes(&self) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::ShapeClear))
    }

    /// Flip the overlay's visibility.
    pub fn toggle_overlay(&self) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::ShapeToggle))
    }

    /// Log a network packet.
    pub fn log_packet(&self, packet: NetworkPacket) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::Packet(packet)))
    }

    /// Empty the packet buffer.
    pub fn clear_packets(&self) -> Result<(), HudError> {
        self.settle(self.emit(&HudEvent::PacketClear))
    }

    fn settle(&self, result: Result<Dispatch, InvariantViolation>) -> Result<(), HudError> {
        let dispatch = result?;
        match dispatch.rejections.into_iter().next() {
            Some(rejection) => Err(rejection.error.into()),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Direct visibility control (not part of the bus vocabulary)
    // ------------------------------------------------------------------

    /// Make the overlay visible.
    pub fn show_overlay(&self) {
        self.overlay.lock().show();
    }

    /// Hide the overlay.
    pub fn hide_overlay(&self) {
        self.overlay.lock().hide();
    }

    /// Flip the performance graphs' visibility.
    pub fn toggle_graphs(&self) {
        self.metrics.lock().toggle();
    }

    /// Make the performance graphs visible.
    pub fn show_graphs(&self) {
        self.metrics.lock().show();
    }

    /// Hide the performance graphs.
    pub fn hide_graphs(&self) {
        self.metrics.lock().hide();
    }

    /// Drop all metric observations.
    pub fn clear_metrics(&self) {
        self.metrics.lock().clear();
    }

    /// Drop all memory snapshots.
    pub fn clear_snapshots(&self) {
        self.memory.lock().clear();
    }

    // ------------------------------------------------------------------
    // Queries (read-only, for the render layer and external consumers)
    // ------------------------------------------------------------------

    /// Per-category metric series, insertion order preserved.
    pub fn series(&self) -> std::collections::BTreeMap<String, Vec<f64>> {
        self.metrics.lock().series()
    }

    /// 0-7 bar levels for one category's series.
    pub fn sparkline(&self, category: &str) -> Vec<u8> {
        self.metrics.lock().sparkline(category)
    }

    /// Whether the performance graphs should be drawn.
    pub fn graphs_visible(&self) -> bool {
        self.metrics.lock().visibility().is_visible()
    }

    /// The most recent accepted memory snapshot.
    pub fn latest_snapshot(&self) -> Option<MemorySnapshot> {
        self.memory.lock().latest().cloned()
    }

    /// Number of snapshots currently in history.
    pub fn snapshot_count(&self) -> usize {
        self.memory.lock().len()
    }

    /// All registered shapes, ordered by id.
    pub fn shapes(&self) -> Vec<DebugShape> {
        self.overlay.lock().iter().cloned().collect()
    }

    /// Whether the overlay should be drawn.
    pub fn overlay_visible(&self) -> bool {
        self.overlay.lock().visibility().is_visible()
    }

    /// Traffic statistics over the live packet buffer.
    pub fn packet_stats(&self) -> PacketStats {
        self.network.lock().stats()
    }

    /// Packets in insertion order, oldest first.
    pub fn packets(&self) -> Vec<NetworkPacket> {
        self.network.lock().packets()
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Assemble a point-in-time export of all four panels' aggregate state.
    pub fn export(&self) -> AggregateExport {
        let now = std::time::Instant::now();
        let mut export = AggregateExport::new(current_timestamp_ms());

        {
            let metrics = self.metrics.lock();
            export.metrics.visible = metrics.visibility().is_visible();
            export.metrics.series = metrics.series();
            export.metrics.latest = metrics.latest().map(|m| MetricExport {
                age_ms: m.age_ms(now),
                value: m.value,
                category: m.category.clone(),
            });
        }
        export.memory = self.latest_snapshot();
        {
            let overlay = self.overlay.lock();
            export.overlay.visible = overlay.visibility().is_visible();
            export.overlay.shapes = overlay.iter().cloned().collect();
        }
        {
            let network = self.network.lock();
            export.network.stats = network.stats();
            export.network.latest = network.latest().cloned();
        }
        export
    }

    /// Export as compact JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.export())
    }

    /// Export as human-readable JSON.
    pub fn export_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export())
    }
}

impl Default for DebugHud {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DebugHud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugHud")
            .field("subscribers", &self.bus.lock().subscriber_count())
            .finish()
    }
}

/// Builder for configuring a [`DebugHud`].
pub struct DebugHudBuilder {
    config: HudConfig,
    probe: Option<Box<dyn MemoryProbe>>,
    render_hook: Arc<dyn RenderHook>,
}

impl DebugHudBuilder {
    /// Create a builder with defaults.
    pub fn new() -> Self {
        Self {
            config: HudConfig::default(),
            probe: None,
            render_hook: Arc::new(NullRenderHook),
        }
    }

    /// Override the panel capacities and tolerances.
    pub fn config(mut self, config: HudConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject the host's memory telemetry source.
    ///
    /// Without one, snapshot requests are rejected.
    pub fn memory_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Install the render notification callback.
    pub fn render_hook(mut self, hook: impl RenderHook + 'static) -> Self {
        self.render_hook = Arc::new(hook);
        self
    }

    /// Build the hub and wire one bus subscriber per panel.
    pub fn build(self) -> DebugHud {
        let metrics = Arc::new(Mutex::new(MetricsPanel::new(&self.config)));
        let memory = Arc::new(Mutex::new(MemoryPanel::new(&self.config, self.probe)));
        let overlay = Arc::new(Mutex::new(OverlayPanel::new()));
        let network = Arc::new(Mutex::new(NetworkPanel::new(&self.config)));

        let mut bus = EventBus::new();

        {
            let panel = metrics.clone();
            let hook = self.render_hook.clone();
            bus.subscribe("metrics", &[EventKind::Metric], move |event| {
                if let HudEvent::Metric(metric) = event {
                    panel.lock().ingest(metric.clone())?;
                    hook.render(PanelId::Metrics);
                }
                Ok(())
            });
        }
        {
            let panel = memory.clone();
            let hook = self.render_hook.clone();
            bus.subscribe("memory", &[EventKind::SnapshotRequest], move |_| {
                panel.lock().take_snapshot()?;
                hook.render(PanelId::Memory);
                Ok(())
            });
        }
        {
            let panel = overlay.clone();
            let hook = self.render_hook.clone();
            bus.subscribe(
                "overlay",
                &[
                    EventKind::ShapeAdd,
                    EventKind::ShapeRemove,
                    EventKind::ShapeClear,
                    EventKind::ShapeToggle,
                ],
                move |event| {
                    {
                        let mut panel = panel.lock();
                        match event {
                            HudEvent::ShapeAdd(shape) => panel.add_shape(shape.clone())?,
                            HudEvent::ShapeRemove { id } => {
                                panel.remove_shape(id);
                            }
                            HudEvent::ShapeClear => panel.clear(),
                            HudEvent::ShapeToggle => panel.toggle(),
                            _ => return Ok(()),
                        }
                    }
                    // Lock released: the hook may query the hub.
                    hook.render(PanelId::Overlay);
                    Ok(())
                },
            );
        }
        {
            let panel = network.clone();
            let hook = self.render_hook.clone();
            bus.subscribe(
                "network",
                &[EventKind::Packet, EventKind::PacketClear],
                move |event| {
                    {
                        let mut panel = panel.lock();
                        match event {
                            HudEvent::Packet(packet) => panel.log_packet(packet.clone())?,
                            HudEvent::PacketClear => panel.clear(),
                            _ => return Ok(()),
                        }
                    }
                    hook.render(PanelId::Network);
                    Ok(())
                },
            );
        }

        debug!(subscribers = bus.subscriber_count(), "hub wired");

        DebugHud {
            bus: Arc::new(Mutex::new(bus)),
            metrics,
            memory,
            overlay,
            network,
        }
    }
}

impl Default for DebugHudBuilder {
    fn default() -> Self {
        Self::new()
    }
}
