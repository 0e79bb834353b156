//! # devhud-types
//!
//! Observation types for the devhud in-process telemetry overlay. This crate
//! defines the schema shared by producers (the host application's frame loop,
//! allocator hooks, network layer) and the devhud core that validates and
//! aggregates their observations.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any
//!   serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Dumb data**: No acceptance rules live here; validation belongs to the
//!   devhud core so every entry point applies the same rules
//! - **Versioned export**: The aggregate export carries a schema version for
//!   forward compatibility
//!
//! ## Example
//!
//! ```rust
//! use devhud_types::{DebugShape, NetworkPacket, PacketDirection, Point};
//!
//! let shape = DebugShape::circle("cursor", Point::new(120.0, 80.0), 12.0);
//! assert_eq!(shape.kind().label(), "circle");
//!
//! let packet = NetworkPacket::new("req-1", PacketDirection::Send, 512)
//!     .with_latency(4.5);
//! assert_eq!(packet.latency_ms, Some(4.5));
//! ```

mod export;
mod memory;
mod metric;
mod packet;
mod shape;
mod time;

pub use export::*;
pub use memory::*;
pub use metric::*;
pub use packet::*;
pub use shape::*;
pub use time::current_timestamp_ms;

/// Current schema version of the aggregate export.
///
/// Increment this when making breaking changes to the export format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;
