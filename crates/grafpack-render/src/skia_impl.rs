//! Software renderer using tiny-skia.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError, ShapeRenderer};
use grafpack_core::shapes::Shape;
use kurbo::{BezPath, PathEl};
use peniko::Color;
use tiny_skia::{LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Convert a kurbo path into a tiny-skia path.
///
/// Returns `None` for paths tiny-skia cannot draw, such as a zero-sized
/// shape that was just pressed.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn new_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RendererError::InvalidSize { width, height })
}

/// Rasterizes the canvas into an RGBA pixmap.
pub struct SkiaRenderer {
    pixmap: Pixmap,
}

impl SkiaRenderer {
    /// Create a renderer with a surface of the given size in pixels.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
        })
    }

    /// The rendered frame. Pixels are premultiplied RGBA.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap = new_pixmap(width, height)?;
        }
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: width as f32,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl ShapeRenderer for SkiaRenderer {
    fn render_shape(&mut self, shape: &Shape, ctx: &RenderContext, selected: bool) {
        let (color, width) = if selected {
            (ctx.selection_color, ctx.selection_width)
        } else {
            (ctx.stroke_color, ctx.stroke_width)
        };
        self.stroke_path(&shape.to_path(), color, width);
    }
}

impl Renderer for SkiaRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let width = ctx.viewport_size.width.round() as u32;
        let height = ctx.viewport_size.height.round() as u32;
        if let Err(err) = self.resize(width, height) {
            log::error!("Skipping frame: {err}");
            return;
        }

        self.pixmap.fill(skia_color(self.background_color(ctx)));

        // List order: later shapes overdraw earlier ones.
        for (shape, selected) in ctx.canvas.shapes_with_selection() {
            self.render_shape(shape, ctx, selected);
        }

        if let Some(provisional) = ctx.provisional {
            self.render_shape(provisional, ctx, false);
        }
    }
}
