//! # devhud-core
//!
//! Instrumentation aggregation core for an in-process developer telemetry
//! and debug overlay. Four panels — performance graphs, memory viewer,
//! visual overlay, network monitor — share one synchronous event bus; each
//! panel validates incoming observations, keeps them in a bounded
//! insertion-ordered window, and derives its statistics from the live buffer
//! on every query. Drawing is someone else's job: the core ends at a render
//! notification callback and a JSON export.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                            DebugHud                            │
//! │                                                                │
//! │  producer ──▶ EventBus ──▶ validate ──▶ panel state ──▶ hook  │
//! │                  │                                             │
//! │                  │         ┌──────────┐  ┌───────────────┐    │
//! │                  ├────────▶│ metrics  │  │ bounded FIFO  │    │
//! │                  ├────────▶│ memory   │──│ buffers /     │    │
//! │                  ├────────▶│ overlay  │  │ id-keyed      │    │
//! │                  └────────▶│ network  │  │ registry      │    │
//! │                            └──────────┘  └───────────────┘    │
//! │                                  │                             │
//! │                                  ▼                             │
//! │                     aggregates (recomputed per query)          │
//! │                     + JSON export                              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`bus`]**: the typed publish/subscribe channel — fixed event
//!   vocabulary, synchronous ordered dispatch, per-subscriber isolation
//! - **[`validate`]**: per-kind acceptance rules; a rejection never mutates
//!   state
//! - **[`history`]**: the bounded FIFO window shared by three of the panels
//! - **[`aggregate`]**: pure derived statistics, never cached
//! - **[`panel`]**: the four controllers owning the actual state
//! - **[`hub`]**: construction, wiring, queries, and export
//!
//! ## Errors
//!
//! [`ValidationError`] is the expected, recoverable class: bad input was
//! rejected and nothing changed. [`InvariantViolation`] means a
//! post-condition failed after a mutation — a bug in this crate, propagated
//! to the host rather than swallowed.
//!
//! ## Usage
//!
//! ```rust
//! use devhud_core::DebugHud;
//! use devhud_types::{NetworkPacket, PacketDirection};
//!
//! let hud = DebugHud::new();
//!
//! hud.add_metric(16.6, "frame-ms").unwrap();
//! hud.log_packet(NetworkPacket::new("req-1", PacketDirection::Send, 512)).unwrap();
//!
//! let stats = hud.packet_stats();
//! assert_eq!(stats.bytes_sent, 512);
//!
//! let json = hud.export_json().unwrap();
//! assert!(json.contains("frame-ms"));
//! ```
//!
//! Hubs are created explicitly and handed to whoever needs them; there is
//! no global instance, so tests and multi-window hosts can run several
//! independent hubs side by side.

pub mod aggregate;
pub mod bus;
pub mod config;
pub mod error;
pub mod history;
pub mod hub;
pub mod panel;
pub mod probe;
pub mod render;
pub mod validate;

#[cfg(feature = "tokio")]
pub mod sampler;

// Re-export main types for convenience
pub use bus::{Dispatch, EventBus, EventKind, HudEvent, Rejection};
pub use config::HudConfig;
pub use error::{HudError, InvariantViolation, ValidationError};
pub use history::BoundedHistory;
pub use hub::{DebugHud, DebugHudBuilder};
pub use panel::{MemoryPanel, MetricsPanel, NetworkPanel, OverlayPanel, Visibility};
pub use probe::MemoryProbe;
pub use render::{NullRenderHook, PanelId, RenderHook};

#[cfg(feature = "tokio")]
pub use sampler::SamplerHandle;

// Re-export the observation types for convenience
pub use devhud_types::{
    AggregateExport, DebugShape, MemoryReading, MemorySnapshot, NetworkPacket, PacketDirection,
    PacketStats, PerformanceMetric, Point, ShapeGeometry, ShapeKind,
};
