//! Regular hexagon shape.

use super::{
    ShapeId, ShapeKind, ShapeTrait, bounds_of, centroid, polygon_path, quantize, quantize_offset,
    rotate_point,
};
use crate::error::EditorResult;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A regular hexagon built around a center point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hexagon {
    pub(crate) id: ShapeId,
    /// Construction center (the creation anchor).
    pub center: Point,
    /// Distance from the center to each vertex.
    pub radius: f64,
    /// Vertices in construction order, starting at angle 0.
    pub vertices: [Point; 6],
}

impl Hexagon {
    /// Create a zero-radius hexagon at `center`.
    pub fn new(center: Point) -> Self {
        let center = quantize(center);
        Self {
            id: Uuid::new_v4(),
            center,
            radius: 0.0,
            vertices: [center; 6],
        }
    }

    /// Recompute the vertices at `60° * i` around the center.
    fn layout(&mut self) {
        for (i, v) in self.vertices.iter_mut().enumerate() {
            let angle = (60.0 * i as f64).to_radians();
            *v = quantize(self.center + Vec2::from_angle(angle) * self.radius);
        }
    }
}

impl ShapeTrait for Hexagon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Hexagon
    }

    fn control_points(&self) -> Vec<Point> {
        self.vertices.to_vec()
    }

    fn center(&self) -> Point {
        centroid(&self.vertices)
    }

    /// Even-odd crossing-number test along a horizontal ray.
    fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y)
                && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        let offset = quantize_offset(dx, dy);
        self.center += offset;
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    fn resize_on_drag(&mut self, point: Point) {
        self.radius = (quantize(point) - self.center).hypot();
        self.layout();
    }

    fn rotate(&mut self, degrees: f64) -> EditorResult<()> {
        let pivot = self.center();
        self.center = rotate_point(self.center, pivot, degrees);
        for v in &mut self.vertices {
            *v = rotate_point(*v, pivot, degrees);
        }
        Ok(())
    }

    fn bounds(&self) -> kurbo::Rect {
        bounds_of(&self.vertices)
    }

    fn to_path(&self) -> BezPath {
        polygon_path(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_util::points_close;
    use std::f64::consts::{PI, TAU};

    fn sample(radius: f64) -> Hexagon {
        let mut hexagon = Hexagon::new(Point::new(0.0, 0.0));
        hexagon.resize_on_drag(Point::new(radius, 0.0));
        hexagon
    }

    /// Winding test by summing the angles subtended by each edge.
    fn angle_sum_contains(vertices: &[Point], p: Point) -> bool {
        let mut total = 0.0;
        for (i, &a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            let mut delta = (b - p).atan2() - (a - p).atan2();
            if delta > PI {
                delta -= TAU;
            } else if delta < -PI {
                delta += TAU;
            }
            total += delta;
        }
        total.abs() > PI
    }

    #[test]
    fn test_vertices_on_radius() {
        let hexagon = sample(40.0);
        assert_eq!(hexagon.vertices[0], Point::new(40.0, 0.0));
        assert_eq!(hexagon.vertices[3], Point::new(-40.0, 0.0));
        for v in hexagon.vertices {
            assert!(((v - hexagon.center).hypot() - 40.0).abs() < 1e-2);
        }
        assert!(points_close(&[hexagon.center()], &[Point::ZERO], 1e-9));
    }

    #[test]
    fn test_radius_from_drag_distance() {
        let mut hexagon = Hexagon::new(Point::new(10.0, 10.0));
        hexagon.resize_on_drag(Point::new(13.0, 14.0));
        assert!((hexagon.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains_matches_reference() {
        let mut rotated = sample(40.0);
        rotated.rotate(17.0).unwrap();
        for hexagon in [sample(40.0), rotated] {
            for yi in -12..12 {
                for xi in -12..12 {
                    let p = Point::new(xi as f64 * 4.0 + 0.5, yi as f64 * 4.0 + 0.5);
                    assert_eq!(
                        hexagon.contains(p),
                        angle_sum_contains(&hexagon.vertices, p),
                        "{p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_six_rotations_restore_vertices() {
        let mut hexagon = sample(50.0);
        hexagon.move_by(120.0, 80.0);
        let original = hexagon.control_points();
        for _ in 0..6 {
            hexagon.rotate(60.0).unwrap();
        }
        assert!(points_close(&hexagon.control_points(), &original, 0.05));
    }

    #[test]
    fn test_single_rotation_maps_onto_itself() {
        let mut hexagon = sample(50.0);
        let original = hexagon.control_points();
        hexagon.rotate(60.0).unwrap();
        // Each vertex moves to where its neighbour was.
        let mut shifted = original.clone();
        shifted.rotate_left(1);
        assert!(points_close(&hexagon.control_points(), &shifted, 0.05));
    }

    #[test]
    fn test_move_translates_center() {
        let mut hexagon = sample(30.0);
        hexagon.move_by(5.0, -5.0);
        assert_eq!(hexagon.center, Point::new(5.0, -5.0));
        assert!(hexagon.contains(Point::new(5.0, -5.0)));
        assert!(!hexagon.contains(Point::new(36.0, -5.0)));
    }
}
