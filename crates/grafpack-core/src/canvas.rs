//! Canvas document and state management.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A committed text label placed on the canvas.
///
/// Labels belong to the canvas, not to the shape model: they never take part
/// in hit-testing or transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub location: Point,
}

/// The committed shapes, in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of shapes. Paint order is back to front; hit-testing
    /// walks it front to back of the list, so the first added shape wins.
    pub order: Vec<ShapeId>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Append a shape to the end of the list.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        self.order.push(id);
        self.shapes.insert(id, shape);
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in list order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// The first shape in list order that contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.shapes_ordered()
            .find(|shape| shape.contains(point))
            .map(Shape::id)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// The canvas state: committed shapes, the single selection and labels.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Currently selected shape, if any.
    pub selection: Option<ShapeId>,
    /// Committed text labels.
    pub annotations: Vec<Annotation>,
    /// Visible client area, which is also the export size.
    pub viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_document(CanvasDocument::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            selection: None,
            annotations: Vec::new(),
            viewport_size: Size::new(800.0, 600.0),
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Select a shape, replacing any previous selection.
    ///
    /// Ids that are not in the document are ignored.
    pub fn select(&mut self, id: ShapeId) {
        if self.document.get_shape(id).is_some() {
            self.selection = Some(id);
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection == Some(id)
    }

    /// The selected shape, if any.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.document.get_shape(id))
    }

    /// The selected shape, mutably.
    pub fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        let id = self.selection?;
        self.document.get_shape_mut(id)
    }

    /// Remove the selected shape and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selection.take()?;
        self.document.remove_shape(id)
    }

    /// Shapes in list order, each paired with its selection flag.
    pub fn shapes_with_selection(&self) -> impl Iterator<Item = (&Shape, bool)> {
        self.document
            .shapes_ordered()
            .map(|shape| (shape, self.is_selected(shape.id())))
    }

    /// Add a committed label.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}
