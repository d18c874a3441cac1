//! Canvas export to raster image files.

use crate::renderer::{RenderContext, Renderer};
use crate::skia_impl::SkiaRenderer;
use grafpack_core::canvas::Canvas;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use kurbo::Size;
use peniko::Color;
use std::path::Path;
use thiserror::Error;

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Export errors. The canvas is never modified by a failed export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export a {width}x{height} image")]
    InvalidSize { width: u32, height: u32 },
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Raster format of an exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    /// Pick the format from the file extension; anything but `.png` is JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => ExportFormat::Png,
            _ => ExportFormat::Jpeg,
        }
    }
}

/// Styles and encoding settings for export.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub background_color: Color,
    pub stroke_color: Color,
    pub selection_color: Color,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            selection_color: Color::from_rgba8(255, 0, 0, 255),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Render the committed shapes into an opaque RGB image of `size`.
///
/// The selection highlight is kept. Text labels and any shape still under
/// construction are not part of the image.
pub fn render_canvas(
    canvas: &Canvas,
    size: Size,
    options: &ExportOptions,
) -> Result<RgbImage, ExportError> {
    let width = size.width.round() as u32;
    let height = size.height.round() as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidSize { width, height });
    }

    let mut renderer = SkiaRenderer::new(width, height)
        .map_err(|_| ExportError::InvalidSize { width, height })?;
    let ctx = RenderContext::new(canvas, size)
        .with_background(options.background_color)
        .with_stroke(options.stroke_color, 1.0)
        .with_selection(options.selection_color, 3.0);
    renderer.build_scene(&ctx);

    // Opaque background, so premultiplied and straight RGB agree.
    let rgb: Vec<u8> = renderer
        .pixmap()
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb).ok_or(ExportError::InvalidSize { width, height })
}

/// Render the canvas and write it to `path`.
///
/// The format follows the file extension (see [`ExportFormat::from_path`]).
/// The image is encoded in memory first, so an encoding failure leaves no
/// file behind.
pub fn export_canvas(
    canvas: &Canvas,
    size: Size,
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportFormat, ExportError> {
    let image = render_canvas(canvas, size, options)?;
    let format = ExportFormat::from_path(path);

    let (width, height) = image.dimensions();
    let mut encoded = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut encoded, quality).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut encoded).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    std::fs::write(path, &encoded)?;

    log::info!(
        "Exported {} shapes as {format:?} ({width}x{height}) to {}",
        canvas.document.len(),
        path.display()
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grafpack_core::canvas::Annotation;
    use grafpack_core::shapes::{Shape, ShapeKind};
    use kurbo::Point;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new();
        let mut square = Shape::create(ShapeKind::Square, Point::new(10.0, 10.0));
        square.resize_on_drag(Point::new(40.0, 40.0));
        let mut circle = Shape::create(ShapeKind::Circle, Point::new(80.0, 30.0));
        circle.resize_on_drag(Point::new(95.0, 30.0));
        let circle_id = circle.id();
        canvas.document.add_shape(square);
        canvas.document.add_shape(circle);
        canvas.select(circle_id);
        canvas
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.png")), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("a.PNG")), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("a.jpg")), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("canvas")), ExportFormat::Jpeg);
    }

    #[test]
    fn test_render_canvas() {
        let canvas = sample_canvas();
        let image =
            render_canvas(&canvas, Size::new(120.0, 60.0), &ExportOptions::default()).unwrap();
        assert_eq!(image.dimensions(), (120, 60));
        // Background fill.
        assert_eq!(image.get_pixel(60, 55).0, [255, 255, 255]);
        // Selected circle outline at its leftmost point (65, 30).
        let [r, g, b] = image.get_pixel(65, 30).0;
        assert!(r > 200 && g < 80 && b < 80);
    }

    #[test]
    fn test_export_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.jpg");
        let format = export_canvas(
            &sample_canvas(),
            Size::new(120.0, 60.0),
            &path,
            &ExportOptions::default(),
        )
        .unwrap();
        assert_eq!(format, ExportFormat::Jpeg);

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 60));
    }

    #[test]
    fn test_export_png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        let canvas = sample_canvas();
        let options = ExportOptions::default();
        export_canvas(&canvas, Size::new(120.0, 60.0), &path, &options).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        let expected = render_canvas(&canvas, Size::new(120.0, 60.0), &options).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_annotations_are_not_exported() {
        let mut canvas = Canvas::new();
        let size = Size::new(50.0, 50.0);
        let blank = render_canvas(&canvas, size, &ExportOptions::default()).unwrap();
        canvas.add_annotation(Annotation {
            text: "label".to_string(),
            location: Point::new(10.0, 10.0),
        });
        let labelled = render_canvas(&canvas, size, &ExportOptions::default()).unwrap();
        assert_eq!(blank, labelled);
    }

    #[test]
    fn test_invalid_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        let result = export_canvas(
            &Canvas::new(),
            Size::new(0.0, 10.0),
            &path,
            &ExportOptions::default(),
        );
        assert!(matches!(result, Err(ExportError::InvalidSize { width: 0, height: 10 })));
        assert!(!path.exists());
    }

    #[test]
    fn test_encode_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.jpg");
        // JPEG caps each dimension at 65535 pixels.
        let result = export_canvas(
            &Canvas::new(),
            Size::new(70_000.0, 1.0),
            &path,
            &ExportOptions::default(),
        );
        assert!(matches!(result, Err(ExportError::Encode(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_io_error_leaves_canvas_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("canvas.jpg");
        let canvas = sample_canvas();
        let before: Vec<Shape> = canvas.document.shapes_ordered().cloned().collect();

        let size = Size::new(64.0, 64.0);
        let result = export_canvas(&canvas, size, &path, &ExportOptions::default());
        assert!(matches!(result, Err(ExportError::Io(_))));
        let after: Vec<Shape> = canvas.document.shapes_ordered().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(canvas.selection, Some(after[1].id()));
    }
}
