//! Square shape.

use super::{
    ShapeId, ShapeKind, ShapeTrait, contains_inclusive, quantize, quantize_offset, rotate_point,
};
use crate::error::EditorResult;
use kurbo::{BezPath, Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned square spanned from `start` towards `end`.
///
/// The side is `max(|dx|, |dy|)` of the two corners. The box grows from
/// `start` in the direction of `end` on each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: ShapeId,
    /// Anchor corner.
    pub start: Point,
    /// Drag corner.
    pub end: Point,
    /// Pivot for the next rotation, if it was fixed before the side was known.
    #[serde(default)]
    pending_pivot: Option<Point>,
}

impl Square {
    /// Create a zero-sized square at `anchor`.
    pub fn new(anchor: Point) -> Self {
        let anchor = quantize(anchor);
        Self {
            id: Uuid::new_v4(),
            start: anchor,
            end: anchor,
            pending_pivot: None,
        }
    }

    /// Create a square whose first rotation pivots on the anchor point.
    pub fn with_legacy_pivot(anchor: Point) -> Self {
        Self {
            pending_pivot: Some(quantize(anchor)),
            ..Self::new(anchor)
        }
    }

    /// Pivot the next rotation will use instead of the midpoint, if any.
    pub fn pending_pivot(&self) -> Option<Point> {
        self.pending_pivot
    }

    /// Side length.
    pub fn side(&self) -> f64 {
        let d = self.end - self.start;
        d.x.abs().max(d.y.abs())
    }

    /// The square as a kurbo Rect.
    pub fn as_rect(&self) -> kurbo::Rect {
        let d = self.end - self.start;
        let side = self.side();
        let sx = if d.x < 0.0 { -side } else { side };
        let sy = if d.y < 0.0 { -side } else { side };
        kurbo::Rect::from_points(self.start, Point::new(self.start.x + sx, self.start.y + sy))
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    fn contains(&self, point: Point) -> bool {
        contains_inclusive(self.as_rect(), point)
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        let offset = quantize_offset(dx, dy);
        self.start += offset;
        self.end += offset;
        if let Some(pivot) = &mut self.pending_pivot {
            *pivot += offset;
        }
    }

    fn resize_on_drag(&mut self, point: Point) {
        self.end = quantize(point);
    }

    fn rotate(&mut self, degrees: f64) -> EditorResult<()> {
        let pivot = self.pending_pivot.take().unwrap_or_else(|| self.center());
        self.start = rotate_point(self.start, pivot, degrees);
        self.end = rotate_point(self.end, pivot, degrees);
        Ok(())
    }

    fn bounds(&self) -> kurbo::Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_util::points_close;

    #[test]
    fn test_drag_scenario() {
        let mut square = Square::new(Point::new(0.0, 0.0));
        square.resize_on_drag(Point::new(50.0, 50.0));
        assert!((square.side() - 50.0).abs() < f64::EPSILON);
        assert!(square.contains(Point::new(25.0, 25.0)));
        assert!(!square.contains(Point::new(60.0, 60.0)));
    }

    #[test]
    fn test_side_uses_larger_delta() {
        let mut square = Square::new(Point::new(10.0, 10.0));
        square.resize_on_drag(Point::new(20.0, 50.0));
        assert!((square.side() - 40.0).abs() < f64::EPSILON);
        let rect = square.as_rect();
        assert_eq!(rect, kurbo::Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_drag_up_left_grows_up_left() {
        let mut square = Square::new(Point::new(100.0, 100.0));
        square.resize_on_drag(Point::new(70.0, 90.0));
        assert_eq!(square.as_rect(), kurbo::Rect::new(70.0, 70.0, 100.0, 100.0));
        assert!(square.contains(square.center()));
    }

    #[test]
    fn test_midpoint_pivot_round_trip() {
        let mut square = Square::new(Point::new(0.0, 0.0));
        square.resize_on_drag(Point::new(50.0, 50.0));
        let original = square.control_points();

        square.rotate(90.0).unwrap();
        assert!(points_close(
            &square.control_points(),
            &[Point::new(50.0, 0.0), Point::new(0.0, 50.0)],
            1e-9
        ));
        square.rotate(-90.0).unwrap();
        assert!(points_close(&square.control_points(), &original, 1e-9));
    }

    #[test]
    fn test_legacy_pivot_first_rotation_uses_anchor() {
        let mut square = Square::with_legacy_pivot(Point::new(0.0, 0.0));
        square.resize_on_drag(Point::new(50.0, 50.0));

        square.rotate(90.0).unwrap();
        // The anchor stays put; only the drag corner swings around it.
        assert!(points_close(
            &square.control_points(),
            &[Point::new(0.0, 0.0), Point::new(-50.0, 50.0)],
            1e-9
        ));
        assert_eq!(square.pending_pivot(), None);

        // Later rotations fall back to the midpoint of the corners.
        let before = square.center();
        square.rotate(180.0).unwrap();
        assert!(points_close(&[square.center()], &[before], 1e-9));
    }

    #[test]
    fn test_move_carries_pending_pivot() {
        let mut square = Square::with_legacy_pivot(Point::new(5.0, 5.0));
        square.resize_on_drag(Point::new(15.0, 15.0));
        square.move_by(10.0, -5.0);
        assert_eq!(square.pending_pivot(), Some(Point::new(15.0, 0.0)));
        assert_eq!(square.start, Point::new(15.0, 0.0));
        assert_eq!(square.end, Point::new(25.0, 10.0));
    }
}
