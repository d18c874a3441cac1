//! GrafPack Render Library
//!
//! Renderer abstraction for GrafPack, a tiny-skia software rasterizer and
//! export of the canvas to JPEG or PNG files.

mod export;
mod renderer;
mod skia_impl;

pub use export::{
    DEFAULT_JPEG_QUALITY, ExportError, ExportFormat, ExportOptions, export_canvas, render_canvas,
};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, ShapeRenderer};
pub use skia_impl::SkiaRenderer;
