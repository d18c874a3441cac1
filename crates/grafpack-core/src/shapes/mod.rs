//! Shape definitions and the per-variant geometry engine.

mod circle;
mod factory;
mod hexagon;
mod rect;
mod square;
mod triangle;

pub use circle::Circle;
pub use factory::ShapeFactory;
pub use hexagon::Hexagon;
pub use rect::Rect;
pub use square::Square;
pub use triangle::Triangle;

use crate::error::{EditorError, EditorResult};
use kurbo::{Affine, BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The closed set of shape kinds the editor can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Hexagon,
    Rectangle,
}

impl ShapeKind {
    /// Every kind, in menu order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Rectangle,
    ];

    /// Display name, as shown in the Create menu.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Rectangle => "Rectangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("rect") {
            return Ok(ShapeKind::Rectangle);
        }
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| EditorError::UnknownKind(s.to_string()))
    }
}

/// Capability interface implemented by every shape variant.
///
/// Angles are in degrees. Rotation uses the standard rotation matrix in
/// screen coordinates (y down), so positive angles appear clockwise.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the kind this shape was created as.
    fn kind(&self) -> ShapeKind;

    /// The points that fully determine the rendered geometry.
    fn control_points(&self) -> Vec<Point>;

    /// Derived center, used as the reference point for rotation gestures.
    fn center(&self) -> Point;

    /// Check if a point lies inside the shape.
    fn contains(&self, point: Point) -> bool;

    /// Translate every control point by the same offset.
    fn move_by(&mut self, dx: f64, dy: f64);

    /// Resize while the shape is being created, given the current drag point.
    fn resize_on_drag(&mut self, point: Point);

    /// Rotate about the variant's pivot.
    fn rotate(&mut self, degrees: f64) -> EditorResult<()>;

    /// Axis-aligned bounding box.
    fn bounds(&self) -> kurbo::Rect;

    /// Outline used for rendering.
    fn to_path(&self) -> BezPath;
}

/// Enum wrapper for all shape variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Square(Square),
    Circle(Circle),
    Triangle(Triangle),
    Hexagon(Hexagon),
    Rect(Rect),
}

impl Shape {
    /// Create a shape of the given kind anchored at `anchor`, using default factory options.
    pub fn create(kind: ShapeKind, anchor: Point) -> Self {
        ShapeFactory::default().create(kind, anchor)
    }

    /// Create a shape from a kind name, rejecting names outside the known kinds.
    pub fn create_named(name: &str, anchor: Point) -> EditorResult<Self> {
        ShapeFactory::default().create_named(name, anchor)
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Square(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Hexagon(s) => s.id(),
            Shape::Rect(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Square(s) => s.kind(),
            Shape::Circle(s) => s.kind(),
            Shape::Triangle(s) => s.kind(),
            Shape::Hexagon(s) => s.kind(),
            Shape::Rect(s) => s.kind(),
        }
    }

    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Shape::Square(s) => s.control_points(),
            Shape::Circle(s) => s.control_points(),
            Shape::Triangle(s) => s.control_points(),
            Shape::Hexagon(s) => s.control_points(),
            Shape::Rect(s) => s.control_points(),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Shape::Square(s) => s.center(),
            Shape::Circle(s) => s.center(),
            Shape::Triangle(s) => s.center(),
            Shape::Hexagon(s) => s.center(),
            Shape::Rect(s) => s.center(),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Square(s) => s.contains(point),
            Shape::Circle(s) => s.contains(point),
            Shape::Triangle(s) => s.contains(point),
            Shape::Hexagon(s) => s.contains(point),
            Shape::Rect(s) => s.contains(point),
        }
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Square(s) => s.move_by(dx, dy),
            Shape::Circle(s) => s.move_by(dx, dy),
            Shape::Triangle(s) => s.move_by(dx, dy),
            Shape::Hexagon(s) => s.move_by(dx, dy),
            Shape::Rect(s) => s.move_by(dx, dy),
        }
    }

    pub fn resize_on_drag(&mut self, point: Point) {
        match self {
            Shape::Square(s) => s.resize_on_drag(point),
            Shape::Circle(s) => s.resize_on_drag(point),
            Shape::Triangle(s) => s.resize_on_drag(point),
            Shape::Hexagon(s) => s.resize_on_drag(point),
            Shape::Rect(s) => s.resize_on_drag(point),
        }
    }

    pub fn rotate(&mut self, degrees: f64) -> EditorResult<()> {
        match self {
            Shape::Square(s) => s.rotate(degrees),
            Shape::Circle(s) => s.rotate(degrees),
            Shape::Triangle(s) => s.rotate(degrees),
            Shape::Hexagon(s) => s.rotate(degrees),
            Shape::Rect(s) => s.rotate(degrees),
        }
    }

    pub fn bounds(&self) -> kurbo::Rect {
        match self {
            Shape::Square(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Hexagon(s) => s.bounds(),
            Shape::Rect(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Square(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Triangle(s) => s.to_path(),
            Shape::Hexagon(s) => s.to_path(),
            Shape::Rect(s) => s.to_path(),
        }
    }

    /// Check if this shape supports rotation.
    ///
    /// Rectangles report support because their rotation is a defined no-op.
    pub fn supports_rotation(&self) -> bool {
        !matches!(self, Shape::Circle(_))
    }
}

/// Sub-pixel resolution of stored coordinates.
///
/// Every stored coordinate and every move offset is snapped to a 1/1024 pixel
/// grid. Sums of grid values are exact in f64, so moves never drift.
pub const SUBPIXEL_STEPS: f64 = 1024.0;

/// Snap a point onto the sub-pixel grid.
pub(crate) fn quantize(point: Point) -> Point {
    Point::new(
        (point.x * SUBPIXEL_STEPS).round() / SUBPIXEL_STEPS,
        (point.y * SUBPIXEL_STEPS).round() / SUBPIXEL_STEPS,
    )
}

/// Snap a translation onto the sub-pixel grid.
///
/// Rounding is symmetric, so a move and its inverse snap to opposite offsets.
pub(crate) fn quantize_offset(dx: f64, dy: f64) -> Vec2 {
    quantize(Point::new(dx, dy)).to_vec2()
}

/// Rotate `point` about `pivot` by `degrees`, snapped onto the sub-pixel grid.
pub(crate) fn rotate_point(point: Point, pivot: Point, degrees: f64) -> Point {
    quantize(Affine::rotate_about(degrees.to_radians(), pivot) * point)
}

/// Arithmetic mean of a set of points.
pub(crate) fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Inclusive containment check; `kurbo::Rect::contains` excludes the far edges.
pub(crate) fn contains_inclusive(rect: kurbo::Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Smallest rectangle containing all points.
pub(crate) fn bounds_of(points: &[Point]) -> kurbo::Rect {
    let Some((&first, rest)) = points.split_first() else {
        return kurbo::Rect::ZERO;
    };
    rest.iter()
        .fold(kurbo::Rect::from_points(first, first), |r, &p| r.union_pt(p))
}

/// Closed polygon outline through the given vertices.
pub(crate) fn polygon_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = vertices.split_first() else {
        return path;
    };
    path.move_to(first);
    for &v in rest {
        path.line_to(v);
    }
    path.close_path();
    path
}

#[cfg(test)]
pub(crate) mod test_util {
    use kurbo::Point;

    /// Component-wise comparison within `tolerance`.
    pub fn points_close(a: &[Point], b: &[Point], tolerance: f64) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(p, q)| (p.x - q.x).abs() <= tolerance && (p.y - q.y).abs() <= tolerance)
    }
}
