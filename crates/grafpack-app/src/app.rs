//! Core application state and session replay.

use crate::menu::MenuRegistry;
use crate::script::{MAX_DRAG_STEPS, SessionScript, Step};
use grafpack_core::{Command, CommandOutcome, Controller, EditorConfig, EditorError};
use grafpack_render::{
    DEFAULT_JPEG_QUALITY, ExportError, ExportFormat, ExportOptions, RenderContext, Renderer,
    RendererError, SkiaRenderer, export_canvas,
};
use kurbo::Size;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// RGBA8 color as stored in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Canvas width in pixels, also the export width.
    pub width: u32,
    /// Canvas height in pixels, also the export height.
    pub height: u32,
    pub background_color: SerializableColor,
    pub stroke_color: SerializableColor,
    pub selection_color: SerializableColor,
    pub jpeg_quality: u8,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "GrafPack".to_string(),
            width: 800,
            height: 600,
            background_color: Color::WHITE.into(),
            stroke_color: Color::BLACK.into(),
            selection_color: SerializableColor::new(255, 0, 0, 255),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Styles and encoding settings used for exports.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            background_color: self.background_color.into(),
            stroke_color: self.stroke_color.into(),
            selection_color: self.selection_color.into(),
            jpeg_quality: self.jpeg_quality,
        }
    }
}

/// Errors raised while replaying a single step.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Unknown menu entry: {0}")]
    UnknownMenu(String),
    #[error("Menu entry {0} needs a file path")]
    MissingPath(String),
    #[error("Drag of {steps} steps exceeds the limit of {MAX_DRAG_STEPS}")]
    DragTooLong { steps: u32 },
}

impl AppError {
    /// Whether this error is a user-facing warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Editor(err) if err.is_warning())
    }
}

/// What happened during a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Steps applied, including the one that requested exit.
    pub steps_run: usize,
    pub warnings: usize,
    pub errors: usize,
    /// Files written by export steps, in order.
    pub exports: Vec<PathBuf>,
    /// Frames repainted in response to state changes.
    pub frames_rendered: usize,
    /// Whether the script asked the editor to exit.
    pub exited: bool,
}

enum Flow {
    Continue,
    Exit,
}

/// Headless editor: the controller plus a live software-rendered view.
pub struct App {
    config: AppConfig,
    controller: Controller,
    renderer: SkiaRenderer,
    frames_rendered: usize,
}

impl App {
    /// Create the editor with an empty canvas of the configured size.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let mut controller = Controller::new(config.editor);
        controller
            .canvas_mut()
            .set_viewport_size(f64::from(config.width), f64::from(config.height));
        let renderer = SkiaRenderer::new(config.width, config.height)?;
        let mut app = Self {
            config,
            controller,
            renderer,
            frames_rendered: 0,
        };
        app.repaint_if_needed();
        Ok(app)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &tiny_skia::Pixmap {
        self.renderer.pixmap()
    }

    /// Replay every step of `script`, stopping early on `Exit`.
    ///
    /// Step failures are logged and counted; they never abort the replay.
    pub fn run_script(&mut self, script: &SessionScript) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        let frames_before = self.frames_rendered;

        for (index, step) in script.steps.iter().enumerate() {
            summary.steps_run += 1;
            match self.apply_step(step, &mut summary) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    log::info!("Exit requested at step {index}");
                    summary.exited = true;
                    break;
                }
                Err(err) => Self::report(index, &err, &mut summary),
            }
        }

        summary.frames_rendered = self.frames_rendered - frames_before;
        self.log_canvas();
        summary
    }

    /// Render the canvas to `path` at the canvas size.
    pub fn export(&self, path: &Path) -> Result<ExportFormat, ExportError> {
        let canvas = self.controller.canvas();
        export_canvas(
            canvas,
            canvas.viewport_size,
            path,
            &self.config.export_options(),
        )
    }

    fn apply_step(&mut self, step: &Step, summary: &mut ReplaySummary) -> Result<Flow, AppError> {
        let flow = match step {
            Step::Command { command } => self.apply_command(command.clone(), summary)?,
            Step::Menu { menu, path } => {
                let item =
                    MenuRegistry::resolve(menu).ok_or_else(|| AppError::UnknownMenu(menu.clone()))?;
                let command = item
                    .command(path.clone())
                    .ok_or_else(|| AppError::MissingPath(item.path.clone()))?;
                self.apply_command(command, summary)?
            }
            Step::Pointer { pointer } => {
                let result = self.controller.handle_pointer(*pointer);
                self.repaint_if_needed();
                result?;
                Flow::Continue
            }
            Step::Key { key } => {
                let result = self.controller.handle_key(*key);
                self.repaint_if_needed();
                result?;
                Flow::Continue
            }
            Step::Drag { drag } => {
                if drag.steps > MAX_DRAG_STEPS {
                    return Err(AppError::DragTooLong { steps: drag.steps });
                }
                // Every event of the gesture is delivered even if one fails.
                let mut first_error = None;
                for event in drag.events() {
                    if let Err(err) = self.controller.handle_pointer(event) {
                        first_error.get_or_insert(err);
                    }
                    self.repaint_if_needed();
                }
                if let Some(err) = first_error {
                    return Err(err.into());
                }
                Flow::Continue
            }
        };
        Ok(flow)
    }

    fn apply_command(
        &mut self,
        command: Command,
        summary: &mut ReplaySummary,
    ) -> Result<Flow, AppError> {
        let result = self.controller.handle_command(command);
        self.repaint_if_needed();
        match result? {
            CommandOutcome::Done => Ok(Flow::Continue),
            CommandOutcome::Exit => Ok(Flow::Exit),
            CommandOutcome::ExportRequested(path) => {
                self.export(&path)?;
                summary.exports.push(path);
                Ok(Flow::Continue)
            }
        }
    }

    fn report(index: usize, err: &AppError, summary: &mut ReplaySummary) {
        if err.is_warning() {
            log::warn!("Step {index}: {err}");
            summary.warnings += 1;
        } else {
            log::error!("Step {index}: {err}");
            summary.errors += 1;
        }
    }

    fn repaint_if_needed(&mut self) {
        if !self.controller.take_repaint() && self.frames_rendered > 0 {
            return;
        }
        let canvas = self.controller.canvas();
        let ctx = RenderContext::new(canvas, canvas.viewport_size)
            .with_provisional(self.controller.provisional())
            .with_background(self.config.background_color.into())
            .with_stroke(self.config.stroke_color.into(), 1.0)
            .with_selection(self.config.selection_color.into(), 3.0);
        self.renderer.build_scene(&ctx);
        self.frames_rendered += 1;
    }

    fn log_canvas(&self) {
        let canvas = self.controller.canvas();
        log::info!("Canvas holds {} shapes", canvas.document.len());
        for (shape, selected) in canvas.shapes_with_selection() {
            let marker = if selected { " (selected)" } else { "" };
            log::info!(
                "  {} {}{marker}: {:?}",
                shape.kind(),
                shape.id(),
                shape.control_points()
            );
        }
        for annotation in &canvas.annotations {
            log::info!(
                "  Label {:?} at ({}, {})",
                annotation.text,
                annotation.location.x,
                annotation.location.y
            );
        }
    }
}
