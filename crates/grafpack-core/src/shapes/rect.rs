//! Axis-aligned rectangle shape.

use super::{ShapeId, ShapeKind, ShapeTrait, contains_inclusive, quantize, quantize_offset};
use crate::error::EditorResult;
use kurbo::{BezPath, Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle between two corners.
///
/// The corners keep the order they were dragged in; geometry queries use the
/// normalized box so a drag up or left still yields a well-formed rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub(crate) id: ShapeId,
    /// Anchor corner.
    pub top_left: Point,
    /// Drag corner.
    pub bottom_right: Point,
}

impl Rect {
    /// Create a zero-sized rectangle at `anchor`.
    pub fn new(anchor: Point) -> Self {
        let anchor = quantize(anchor);
        Self {
            id: Uuid::new_v4(),
            top_left: anchor,
            bottom_right: anchor,
        }
    }

    /// Get as a normalized kurbo Rect.
    pub fn as_rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_points(self.top_left, self.bottom_right)
    }
}

impl ShapeTrait for Rect {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.top_left, self.bottom_right]
    }

    fn center(&self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }

    fn contains(&self, point: Point) -> bool {
        contains_inclusive(self.as_rect(), point)
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        let offset = quantize_offset(dx, dy);
        self.top_left += offset;
        self.bottom_right += offset;
    }

    fn resize_on_drag(&mut self, point: Point) {
        self.bottom_right = quantize(point);
    }

    /// Axis-aligned rectangles do not rotate; this succeeds and changes nothing.
    fn rotate(&mut self, degrees: f64) -> EditorResult<()> {
        log::trace!("Ignoring rotation by {degrees} for rectangle {}", self.id);
        Ok(())
    }

    fn bounds(&self) -> kurbo::Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}
