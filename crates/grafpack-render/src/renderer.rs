//! Renderer trait abstraction.

use grafpack_core::canvas::Canvas;
use grafpack_core::shapes::Shape;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Cannot create a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Shape under construction, drawn on top of everything else.
    pub provisional: Option<&'a Shape>,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Outline color of unselected shapes.
    pub stroke_color: Color,
    /// Outline width of unselected shapes.
    pub stroke_width: f64,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Outline width of the selected shape.
    pub selection_width: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with the default editor styles.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            provisional: None,
            viewport_size,
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            selection_color: Color::from_rgba8(255, 0, 0, 255),
            selection_width: 3.0,
        }
    }

    /// Set the shape under construction.
    pub fn with_provisional(mut self, shape: Option<&'a Shape>) -> Self {
        self.provisional = shape;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the outline style of unselected shapes.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self
    }

    /// Set the outline style of the selected shape.
    pub fn with_selection(mut self, color: Color, width: f64) -> Self {
        self.selection_color = color;
        self.selection_width = width;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Draw a full frame: background, shapes in list order, then the provisional shape.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Trait for rendering individual shapes.
pub trait ShapeRenderer {
    /// Render a shape outline, highlighted if `selected`.
    fn render_shape(&mut self, shape: &Shape, ctx: &RenderContext, selected: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn test_default_styles() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(640.0, 480.0));
        assert_eq!(rgba(ctx.background_color), [255, 255, 255, 255]);
        assert_eq!(rgba(ctx.stroke_color), [0, 0, 0, 255]);
        assert_eq!(rgba(ctx.selection_color), [255, 0, 0, 255]);
        assert!((ctx.selection_width - 3.0).abs() < f64::EPSILON);
        assert!(ctx.provisional.is_none());
    }

    #[test]
    fn test_builder() {
        let canvas = Canvas::new();
        let blue = Color::from_rgba8(0, 0, 255, 255);
        let ctx = RenderContext::new(&canvas, Size::new(10.0, 10.0))
            .with_background(blue)
            .with_stroke(blue, 2.0)
            .with_selection(blue, 5.0);
        assert_eq!(rgba(ctx.background_color), [0, 0, 255, 255]);
        assert!((ctx.stroke_width - 2.0).abs() < f64::EPSILON);
        assert!((ctx.selection_width - 5.0).abs() < f64::EPSILON);
    }
}
