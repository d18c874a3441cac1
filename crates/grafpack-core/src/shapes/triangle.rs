//! Triangle shape.

use super::{
    ShapeId, ShapeKind, ShapeTrait, bounds_of, centroid, polygon_path, quantize, quantize_offset,
    rotate_point,
};
use crate::error::EditorResult;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tolerance of the area-sum containment test.
const AREA_EPSILON: f64 = 1e-5;

/// Area of the triangle `abc`.
fn area(a: Point, b: Point, c: Point) -> f64 {
    (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)).abs() / 2.0
}

/// A triangle given by three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Vertices; the first one is the creation anchor.
    pub vertices: [Point; 3],
}

impl Triangle {
    /// Create a collapsed triangle at `anchor`.
    pub fn new(anchor: Point) -> Self {
        Self::from_vertices([quantize(anchor); 3])
    }

    /// Create a triangle from explicit vertices.
    pub fn from_vertices(vertices: [Point; 3]) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices,
        }
    }

    /// Area of the triangle.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        area(a, b, c)
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn control_points(&self) -> Vec<Point> {
        self.vertices.to_vec()
    }

    fn center(&self) -> Point {
        centroid(&self.vertices)
    }

    fn contains(&self, point: Point) -> bool {
        let [a, b, c] = self.vertices;
        let parts = area(point, b, c) + area(a, point, c) + area(a, b, point);
        (area(a, b, c) - parts).abs() < AREA_EPSILON
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        let offset = quantize_offset(dx, dy);
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    fn resize_on_drag(&mut self, point: Point) {
        let point = quantize(point);
        let anchor = self.vertices[0];
        let second = Point::new(anchor.x, point.y);
        let mid = anchor.midpoint(second);
        // The drag point turned a quarter around the midpoint of the first edge.
        let third = Point::new(mid.x + (mid.y - point.y), mid.y - (point.x - mid.x));
        self.vertices[1] = second;
        self.vertices[2] = quantize(third);
    }

    fn rotate(&mut self, degrees: f64) -> EditorResult<()> {
        let pivot = self.center();
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
