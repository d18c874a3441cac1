//! Circle shape.

use super::{ShapeId, ShapeKind, ShapeTrait, quantize, quantize_offset};
use crate::error::{EditorError, EditorResult};
use kurbo::{BezPath, Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle given by its center and a point on its rim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point (the creation anchor).
    pub center: Point,
    /// A point on the rim; the radius is its distance from the center.
    pub rim: Point,
}

impl Circle {
    /// Create a zero-radius circle centered at `center`.
    pub fn new(center: Point) -> Self {
        let center = quantize(center);
        Self {
            id: Uuid::new_v4(),
            center,
            rim: center,
        }
    }

    /// Radius of the circle.
    pub fn radius(&self) -> f64 {
        (self.rim - self.center).hypot()
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> kurbo::Circle {
        kurbo::Circle::new(self.center, self.radius())
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.center, self.rim]
    }

    fn center(&self) -> Point {
        self.center
    }

    fn contains(&self, point: Point) -> bool {
        // Squared distances only: no rounding from a square root.
        (point - self.center).hypot2() <= (self.rim - self.center).hypot2()
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        let offset = quantize_offset(dx, dy);
        self.center += offset;
        self.rim += offset;
    }

    fn resize_on_drag(&mut self, point: Point) {
        self.rim = quantize(point);
    }

    fn rotate(&mut self, _degrees: f64) -> EditorResult<()> {
        Err(EditorError::UnsupportedOperation {
            operation: "Rotation",
            kind: ShapeKind::Circle,
        })
    }

    fn bounds(&self) -> kurbo::Rect {
        let r = self.radius();
        kurbo::Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}
