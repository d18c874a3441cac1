//! Shape factory.

use super::{Circle, Hexagon, Rect, Shape, ShapeKind, Square, Triangle};
use crate::config::SquarePivot;
use crate::error::EditorResult;
use kurbo::Point;

/// Builds provisional shapes from a kind and an anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeFactory {
    /// Rotation pivot rule given to new squares.
    pub square_pivot: SquarePivot,
}

impl ShapeFactory {
    /// Create a factory with the given square pivot rule.
    pub fn new(square_pivot: SquarePivot) -> Self {
        Self { square_pivot }
    }

    /// Create a zero-sized shape of `kind` anchored at `anchor`.
    pub fn create(&self, kind: ShapeKind, anchor: Point) -> Shape {
        log::debug!("Creating {kind} at ({}, {})", anchor.x, anchor.y);
        match kind {
            ShapeKind::Square => Shape::Square(match self.square_pivot {
                SquarePivot::Midpoint => Square::new(anchor),
                SquarePivot::LegacyAnchor => Square::with_legacy_pivot(anchor),
            }),
            ShapeKind::Circle => Shape::Circle(Circle::new(anchor)),
            ShapeKind::Triangle => Shape::Triangle(Triangle::new(anchor)),
            ShapeKind::Hexagon => Shape::Hexagon(Hexagon::new(anchor)),
            ShapeKind::Rectangle => Shape::Rect(Rect::new(anchor)),
        }
    }

    /// Create a shape from a kind name.
    ///
    /// Fails with [`EditorError::UnknownKind`](crate::EditorError::UnknownKind)
    /// before anything is allocated if the name is not a known kind.
    pub fn create_named(&self, name: &str, anchor: Point) -> EditorResult<Shape> {
        let kind = name.parse::<ShapeKind>()?;
        Ok(self.create(kind, anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    #[test]
    fn test_new_shapes_are_zero_sized() {
        let factory = ShapeFactory::default();
        let anchor = Point::new(12.0, 34.0);
        for kind in ShapeKind::ALL {
            let shape = factory.create(kind, anchor);
            assert!(shape.control_points().iter().all(|&p| p == anchor));
        }
    }

    #[test]
    fn test_unknown_name() {
        let factory = ShapeFactory::new(SquarePivot::LegacyAnchor);
        assert_eq!(
            factory.create_named("Octagon", Point::ZERO),
            Err(EditorError::UnknownKind("Octagon".to_string()))
        );
    }

    #[test]
    fn test_square_pivot_option() {
        let factory = ShapeFactory::new(SquarePivot::LegacyAnchor);
        let Shape::Square(square) = factory.create(ShapeKind::Square, Point::ZERO) else {
            panic!("expected a square");
        };
        assert_eq!(square.pending_pivot(), Some(Point::ZERO));

        let Shape::Square(square) = ShapeFactory::default().create(ShapeKind::Square, Point::ZERO)
        else {
            panic!("expected a square");
        };
        assert_eq!(square.pending_pivot(), None);
    }
}
