//! Visual overlay panel.

use std::collections::BTreeMap;

use devhud_types::DebugShape;

use crate::error::HudError;
use crate::panel::Visibility;
use crate::validate;

/// Controller for the debug shape registry.
///
/// Shapes are keyed by id with last-write-wins semantics. Validation is
/// all-or-nothing: a rejected shape leaves the registry exactly as it was,
/// including any previous shape under the same id. Shapes never expire;
/// removal is explicit.
#[derive(Debug, Default)]
pub struct OverlayPanel {
    shapes: BTreeMap<String, DebugShape>,
    visibility: Visibility,
}

impl OverlayPanel {
    /// Create an empty registry, hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a shape keyed by its id.
    pub fn add_shape(&mut self, shape: DebugShape) -> Result<(), HudError> {
        validate::check_shape(&shape)?;
        self.shapes.insert(shape.id.clone(), shape);
        Ok(())
    }

    /// Remove a shape by id. Absent ids are a no-op, not an error.
    ///
    /// Returns whether a shape was actually removed.
    pub fn remove_shape(&mut self, id: &str) -> bool {
        self.shapes.remove(id).is_some()
    }

    /// Empty the registry. Idempotent.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Look up a shape by id.
    pub fn get(&self, id: &str) -> Option<&DebugShape> {
        self.shapes.get(id)
    }

    /// Number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate shapes ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &DebugShape> {
        self.shapes.values()
    }

    /// Current visibility flag.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Flip visibility.
    pub fn toggle(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    /// Make the overlay visible.
    pub fn show(&mut self) {
        self.visibility = Visibility::Visible;
    }

    /// Hide the overlay.
    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }
}
