//! Render notification seam.
//!
//! Drawing lives entirely outside this core. Panels announce that their
//! state changed through a [`RenderHook`]; what the host does with that
//! signal (schedule a repaint, mark a canvas dirty, nothing) is its own
//! business.

/// Identifies which panel's state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Metrics,
    Memory,
    Overlay,
    Network,
}

/// Callback invoked after every successful panel mutation.
///
/// The hook runs while dispatch is still in progress: panel locks are
/// already released, so the hook may query the hub freely, but it must not
/// emit events — dispatch is strictly serialized and a re-entrant emit
/// would self-deadlock.
pub trait RenderHook: Send + Sync {
    /// The named panel has new state to draw.
    fn render(&self, panel: PanelId);
}

/// Default hook that drops every notification.
#[derive(Debug, Default)]
pub struct NullRenderHook;

impl RenderHook for NullRenderHook {
    fn render(&self, _panel: PanelId) {}
}
