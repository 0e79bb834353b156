//! Visual debug annotations.

/// A point in the host application's 2D overlay space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The recognized shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShapeKind {
    Point,
    Line,
    Box,
    Circle,
}

impl ShapeKind {
    /// Returns the wire label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Box => "box",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Kind-specific geometry payload.
///
/// Each variant carries exactly the extra data its kind requires: a line has
/// an end point, a box has a size vector, a circle has a radius, and a point
/// needs nothing beyond its position. Constructing a shape therefore cannot
/// leave its payload incomplete; the devhud core still validates that the
/// carried numbers are finite (and the radius positive).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ShapeGeometry {
    Point,
    Line { end: Point },
    Box { size: Point },
    Circle { radius: f64 },
}

impl ShapeGeometry {
    /// The kind this geometry belongs to.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Point => ShapeKind::Point,
            ShapeGeometry::Line { .. } => ShapeKind::Line,
            ShapeGeometry::Box { .. } => ShapeKind::Box,
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
        }
    }
}

/// A named visual annotation in the debug overlay.
///
/// Shapes are keyed by `id` with last-write-wins semantics: adding a shape
/// under an existing id replaces it wholesale, there is no merging. Removal
/// is explicit; shapes never expire on their own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugShape {
    /// Caller-supplied identity key.
    pub id: String,
    /// Anchor position in overlay space.
    pub position: Point,
    /// Optional display color (any string the render layer understands).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub color: Option<String>,
    /// Kind-specific payload.
    pub geometry: ShapeGeometry,
}

impl DebugShape {
    /// A point marker.
    pub fn point(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            color: None,
            geometry: ShapeGeometry::Point,
        }
    }

    /// A line from `position` to `end`.
    pub fn line(id: impl Into<String>, position: Point, end: Point) -> Self {
        Self {
            id: id.into(),
            position,
            color: None,
            geometry: ShapeGeometry::Line { end },
        }
    }

    /// An axis-aligned box anchored at `position` with extent `size`.
    pub fn boxed(id: impl Into<String>, position: Point, size: Point) -> Self {
        Self {
            id: id.into(),
            position,
            color: None,
            geometry: ShapeGeometry::Box { size },
        }
    }

    /// A circle centered at `position`.
    pub fn circle(id: impl Into<String>, position: Point, radius: f64) -> Self {
        Self {
            id: id.into(),
            position,
            color: None,
            geometry: ShapeGeometry::Circle { radius },
        }
    }

    /// Attach a display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The shape's kind, derived from its geometry.
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(DebugShape::point("a", p).kind(), ShapeKind::Point);
        assert_eq!(DebugShape::line("b", p, Point::new(3.0, 4.0)).kind(), ShapeKind::Line);
        assert_eq!(DebugShape::boxed("c", p, Point::new(10.0, 5.0)).kind(), ShapeKind::Box);
        assert_eq!(DebugShape::circle("d", p, 5.0).kind(), ShapeKind::Circle);
    }

    #[test]
    fn with_color_attaches() {
        let shape = DebugShape::point("a", Point::default()).with_color("#ff0000");
        assert_eq!(shape.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn point_finiteness() {
        assert!(Point::new(0.0, -3.5).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn geometry_tags_with_kind_label() {
        let json = serde_json::to_string(&ShapeGeometry::Circle { radius: 5.0 }).unwrap();
        assert_eq!(json, r#"{"type":"circle","radius":5.0}"#);

        let json = serde_json::to_string(&ShapeGeometry::Point).unwrap();
        assert_eq!(json, r#"{"type":"point"}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn incomplete_payload_fails_to_parse() {
        // A circle without a radius has no valid representation.
        let result: Result<ShapeGeometry, _> = serde_json::from_str(r#"{"type":"circle"}"#);
        assert!(result.is_err());
    }
}
