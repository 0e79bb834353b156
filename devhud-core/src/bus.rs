//! The typed event bus every producer and panel shares.
//!
//! One channel, a fixed vocabulary of named events with a fixed payload
//! shape each, synchronous dispatch in emission order. There is no queue and
//! no backpressure: an event is handled to completion before `emit` returns,
//! and anything a panel will not accept is rejected by validation rather
//! than buffered.

use devhud_types::{DebugShape, NetworkPacket, PerformanceMetric};
use tracing::warn;

use crate::error::{HudError, InvariantViolation, ValidationError};

/// An ingestion event with its fixed payload.
#[derive(Debug, Clone)]
pub enum HudEvent {
    /// A performance observation for the graphs panel.
    Metric(PerformanceMetric),
    /// Ask the memory panel to capture a snapshot from its probe.
    SnapshotRequest,
    /// Insert or overwrite a shape in the overlay registry.
    ShapeAdd(DebugShape),
    /// Remove a shape by id; a no-op when absent.
    ShapeRemove { id: String },
    /// Empty the overlay registry.
    ShapeClear,
    /// Flip the overlay's visibility flag.
    ShapeToggle,
    /// A packet observation for the network monitor.
    Packet(NetworkPacket),
    /// Empty the packet buffer.
    PacketClear,
}

impl HudEvent {
    /// The event's name in the bus vocabulary.
    pub fn kind(&self) -> EventKind {
        match self {
            HudEvent::Metric(_) => EventKind::Metric,
            HudEvent::SnapshotRequest => EventKind::SnapshotRequest,
            HudEvent::ShapeAdd(_) => EventKind::ShapeAdd,
            HudEvent::ShapeRemove { .. } => EventKind::ShapeRemove,
            HudEvent::ShapeClear => EventKind::ShapeClear,
            HudEvent::ShapeToggle => EventKind::ShapeToggle,
            HudEvent::Packet(_) => EventKind::Packet,
            HudEvent::PacketClear => EventKind::PacketClear,
        }
    }
}

/// Discriminant of [`HudEvent`], used for subscription filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Metric,
    SnapshotRequest,
    ShapeAdd,
    ShapeRemove,
    ShapeClear,
    ShapeToggle,
    Packet,
    PacketClear,
}

type Handler = Box<dyn FnMut(&HudEvent) -> Result<(), HudError> + Send>;

struct Subscription {
    label: &'static str,
    kinds: Vec<EventKind>,
    handler: Handler,
}

/// One subscriber's rejection of an event, as reported by [`EventBus::emit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Label of the subscriber that rejected the event.
    pub subscriber: &'static str,
    /// Why the input was rejected.
    pub error: ValidationError,
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Subscribers that handled the event successfully.
    pub accepted: usize,
    /// Subscribers that rejected the event, with their reasons.
    pub rejections: Vec<Rejection>,
}

impl Dispatch {
    /// Whether every interested subscriber accepted the event.
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Synchronous publish/subscribe channel.
///
/// Subscribers are invoked in registration order for every event whose kind
/// they declared interest in. A subscriber that rejects or fails never
/// prevents delivery to the others: validation rejections are collected into
/// the returned [`Dispatch`], and the first [`InvariantViolation`] is
/// returned as `Err` after delivery to all subscribers has completed —
/// fatal errors propagate, they are not swallowed.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscription>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for the given event kinds.
    ///
    /// `label` identifies the subscriber in dispatch reports and logs.
    pub fn subscribe(
        &mut self,
        label: &'static str,
        kinds: &[EventKind],
        handler: impl FnMut(&HudEvent) -> Result<(), HudError> + Send + 'static,
    ) {
        self.subscribers.push(Subscription {
            label,
            kinds: kinds.to_vec(),
            handler: Box::new(handler),
        });
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Dispatch one event to every interested subscriber, in order.
    pub fn emit(&mut self, event: &HudEvent) -> Result<Dispatch, InvariantViolation> {
        let kind = event.kind();
        let mut dispatch = Dispatch::default();
        let mut violation: Option<InvariantViolation> = None;

        for sub in self.subscribers.iter_mut() {
            if !sub.kinds.contains(&kind) {
                continue;
            }
            match (sub.handler)(event) {
                Ok(()) => dispatch.accepted += 1,
                Err(HudError::Rejected(error)) => {
                    warn!(subscriber = sub.label, %error, "observation rejected");
                    dispatch.rejections.push(Rejection {
                        subscriber: sub.label,
                        error,
                    });
                }
                Err(HudError::Invariant(v)) => {
                    // Keep delivering; surface the first violation once
                    // every subscriber has seen the event.
                    violation.get_or_insert(v);
                }
            }
        }

        match violation {
            Some(v) => Err(v),
            None => Ok(dispatch),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
