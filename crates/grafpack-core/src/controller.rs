//! Interaction controller.
//!
//! A finite-state machine that turns menu commands, pointer events and key
//! presses into edits of the canvas. The current [`InteractionState`] is the
//! only place that decides which gesture consumes pointer moves.

use crate::canvas::{Annotation, Canvas};
use crate::command::{Command, CommandOutcome};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::shapes::{Shape, ShapeFactory, ShapeId, ShapeKind, quantize};
use kurbo::Point;

/// The active gesture or mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Waiting for input. A press selects and starts dragging or rotating.
    #[default]
    Idle,
    /// Armed to create `kind`; the provisional shape exists once the pointer is down.
    Creating {
        kind: ShapeKind,
        provisional: Option<Shape>,
    },
    /// Moving the selected shape with the pointer.
    Dragging { shape_id: ShapeId, last: Point },
    /// Rotating the selected shape around its center with the pointer.
    Rotating { shape_id: ShapeId, last: Point },
    /// Placing and typing a text label.
    Annotating {
        location: Option<Point>,
        text: String,
    },
}

impl InteractionState {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Creating { .. } => "Creating",
            InteractionState::Dragging { .. } => "Dragging",
            InteractionState::Rotating { .. } => "Rotating",
            InteractionState::Annotating { .. } => "Annotating",
        }
    }

    /// Whether pointer moves drive a gesture in this state.
    pub fn consumes_pointer_moves(&self) -> bool {
        matches!(
            self,
            InteractionState::Creating {
                provisional: Some(_),
                ..
            } | InteractionState::Dragging { .. }
                | InteractionState::Rotating { .. }
        )
    }
}

/// Signed angle in degrees, normalized into `[0, 360)`, swept when the
/// pointer goes from `last` to `current` around `center`.
pub fn sweep_angle(center: Point, last: Point, current: Point) -> f64 {
    let from = center - last;
    let to = center - current;
    let angle = (to.atan2() - from.atan2()).to_degrees().rem_euclid(360.0);
    // A tiny negative sweep rounds up to exactly 360.
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Owns the canvas and applies user input to it.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    config: EditorConfig,
    factory: ShapeFactory,
    canvas: Canvas,
    state: InteractionState,
    repaint: bool,
}

impl Controller {
    /// Create a controller with an empty canvas.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_canvas(config, Canvas::new())
    }

    /// Create a controller editing an existing canvas.
    pub fn with_canvas(config: EditorConfig, canvas: Canvas) -> Self {
        Self {
            config,
            factory: ShapeFactory::new(config.square_pivot),
            canvas,
            state: InteractionState::Idle,
            repaint: false,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access for the host, e.g. to resize the viewport.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        self.repaint = true;
        &mut self.canvas
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The shape under construction, drawn on top of the committed shapes.
    pub fn provisional(&self) -> Option<&Shape> {
        match &self.state {
            InteractionState::Creating { provisional, .. } => provisional.as_ref(),
            _ => None,
        }
    }

    /// Check whether anything visible changed since the last [`take_repaint`](Self::take_repaint).
    pub fn needs_repaint(&self) -> bool {
        self.repaint
    }

    /// Read and clear the repaint flag.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    /// Return to `Idle`, discarding any provisional shape and uncommitted label.
    pub fn reset(&mut self) {
        if self.provisional().is_some() {
            self.repaint = true;
        }
        self.set_state(InteractionState::Idle);
    }

    /// Handle a menu command.
    pub fn handle_command(&mut self, command: Command) -> EditorResult<CommandOutcome> {
        log::debug!("Command {command:?} in state {}", self.state.name());
        match command {
            Command::Create(kind) => {
                self.leave_current_mode();
                self.set_state(InteractionState::Creating {
                    kind,
                    provisional: None,
                });
            }
            Command::Select => {
                self.leave_current_mode();
                self.set_state(InteractionState::Idle);
            }
            Command::Move => {
                if self.canvas.selection.is_none() {
                    return Err(EditorError::NoSelection { action: "move" });
                }
                log::debug!("Selected shape can now be dragged");
            }
            Command::Rotate(preset) => self.rotate_selected(preset.degrees())?,
            Command::TextAnnotation => {
                self.leave_current_mode();
                self.set_state(InteractionState::Annotating {
                    location: None,
                    text: String::new(),
                });
            }
            Command::Delete => self.delete_selected()?,
            Command::Exit => return Ok(CommandOutcome::Exit),
            Command::ExportToImage(path) => return Ok(CommandOutcome::ExportRequested(path)),
        }
        Ok(CommandOutcome::Done)
    }

    /// Rotate the selected shape by `degrees` without changing state.
    pub fn rotate_selected(&mut self, degrees: f64) -> EditorResult<()> {
        let shape = self
            .canvas
            .selected_shape_mut()
            .ok_or(EditorError::NoSelection { action: "rotate" })?;
        shape.rotate(degrees)?;
        log::info!("Rotated {} {} by {degrees} degrees", shape.kind(), shape.id());
        self.repaint = true;
        Ok(())
    }

    /// Remove the selected shape and clear the selection.
    pub fn delete_selected(&mut self) -> EditorResult<()> {
        let shape = self
            .canvas
            .delete_selected()
            .ok_or(EditorError::NoSelection { action: "delete" })?;
        log::info!("Deleted {} {}", shape.kind(), shape.id());
        let gesture_on_deleted = matches!(
            &self.state,
            InteractionState::Dragging { shape_id, .. }
                | InteractionState::Rotating { shape_id, .. }
                if *shape_id == shape.id()
        );
        if gesture_on_deleted {
            self.set_state(InteractionState::Idle);
        }
        self.repaint = true;
        Ok(())
    }

    /// Handle a pointer event in canvas coordinates.
    ///
    /// Positions are snapped onto the sub-pixel grid first, so the deltas of
    /// a drag sum exactly and a drag back to the press point restores the shape.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditorResult<()> {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => {
                if button != MouseButton::Left {
                    log::debug!("Ignoring {button:?} button press");
                    return Ok(());
                }
                self.pointer_down(quantize(position), modifiers)
            }
            PointerEvent::Move { position } => self.pointer_move(quantize(position)),
            PointerEvent::Up { position, button } => {
                if button != MouseButton::Left {
                    return Ok(());
                }
                self.pointer_up(quantize(position));
                Ok(())
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorResult<()> {
        if key == KeyEvent::Escape {
            log::debug!("Escape in state {}", self.state.name());
            self.reset();
            return Ok(());
        }
        let InteractionState::Annotating { location, text } = &mut self.state else {
            return Ok(());
        };
        match key {
            KeyEvent::Char(c) => text.push(c),
            KeyEvent::Backspace => {
                text.pop();
            }
            KeyEvent::Enter => {
                if location.is_none() {
                    log::debug!("No label location yet, discarding annotation");
                }
                self.commit_annotation();
                self.set_state(InteractionState::Idle);
            }
            KeyEvent::Escape => {}
        }
        Ok(())
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers) -> EditorResult<()> {
        match &mut self.state {
            InteractionState::Creating { kind, provisional } => {
                if provisional.is_none() {
                    *provisional = Some(self.factory.create(*kind, position));
                    self.repaint = true;
                }
                Ok(())
            }
            InteractionState::Annotating { location, .. } if location.is_none() => {
                log::debug!("Placing label at ({}, {})", position.x, position.y);
                *location = Some(position);
                Ok(())
            }
            InteractionState::Annotating { .. } => {
                // Clicking away from the label being typed commits it.
                self.commit_annotation();
                self.set_state(InteractionState::Idle);
                self.idle_press(position, modifiers)
            }
            InteractionState::Idle
            | InteractionState::Dragging { .. }
            | InteractionState::Rotating { .. } => self.idle_press(position, modifiers),
        }
    }

    fn idle_press(&mut self, position: Point, modifiers: Modifiers) -> EditorResult<()> {
        let hit = self.canvas.document.hit_test(position);
        if self.config.rotate_modifier.is_held(modifiers) {
            // Rotation works on the hit shape, or keeps the current selection.
            let Some(shape_id) = hit.or(self.canvas.selection) else {
                self.set_state(InteractionState::Idle);
                return Ok(());
            };
            self.select(shape_id);
            let Some(shape) = self.canvas.document.get_shape(shape_id) else {
                self.set_state(InteractionState::Idle);
                return Ok(());
            };
            if !shape.supports_rotation() {
                let kind = shape.kind();
                self.set_state(InteractionState::Idle);
                return Err(EditorError::UnsupportedOperation {
                    operation: "Rotation",
                    kind,
                });
            }
            self.set_state(InteractionState::Rotating {
                shape_id,
                last: position,
            });
            return Ok(());
        }

        match hit {
            Some(shape_id) => {
                self.select(shape_id);
                self.set_state(InteractionState::Dragging {
                    shape_id,
                    last: position,
                });
            }
            None => {
                if self.canvas.selection.take().is_some() {
                    self.repaint = true;
                }
                self.set_state(InteractionState::Idle);
            }
        }
        Ok(())
    }

    fn pointer_move(&mut self, position: Point) -> EditorResult<()> {
        match &mut self.state {
            InteractionState::Creating {
                provisional: Some(shape),
                ..
            } => {
                shape.resize_on_drag(position);
                self.repaint = true;
            }
            InteractionState::Dragging { shape_id, last } => {
                let delta = position - *last;
                *last = position;
                let Some(shape) = self.canvas.document.get_shape_mut(*shape_id) else {
                    self.set_state(InteractionState::Idle);
                    return Ok(());
                };
                if delta.x != 0.0 || delta.y != 0.0 {
                    shape.move_by(delta.x, delta.y);
                    self.repaint = true;
                }
            }
            InteractionState::Rotating { shape_id, last } => {
                let from = *last;
                *last = position;
                let Some(shape) = self.canvas.document.get_shape_mut(*shape_id) else {
                    self.set_state(InteractionState::Idle);
                    return Ok(());
                };
                let angle = sweep_angle(shape.center(), from, position);
                if angle != 0.0 {
                    shape.rotate(angle)?;
                    self.repaint = true;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn pointer_up(&mut self, position: Point) {
        let previous = self.state.name();
        match std::mem::take(&mut self.state) {
            InteractionState::Creating {
                provisional: Some(shape),
                ..
            } => {
                log::info!(
                    "Committed {} {} at ({}, {})",
                    shape.kind(),
                    shape.id(),
                    position.x,
                    position.y
                );
                self.canvas.document.add_shape(shape);
                self.repaint = true;
                log::debug!("State {previous} -> Idle");
            }
            InteractionState::Dragging { .. } | InteractionState::Rotating { .. } => {
                log::debug!("State {previous} -> Idle");
            }
            // Releases without a matching press leave the mode untouched.
            other => self.state = other,
        }
    }

    /// Commit a pending label and discard a provisional shape before switching modes.
    fn leave_current_mode(&mut self) {
        self.commit_annotation();
        if self.provisional().is_some() {
            log::debug!("Discarding provisional shape");
            self.repaint = true;
        }
    }

    /// Add the label being typed to the canvas, if it has been placed.
    fn commit_annotation(&mut self) {
        let InteractionState::Annotating {
            location: Some(location),
            text,
        } = &mut self.state
        else {
            return;
        };
        let annotation = Annotation {
            text: std::mem::take(text),
            location: *location,
        };
        log::info!(
            "Committed label {:?} at ({}, {})",
            annotation.text,
            location.x,
            location.y
        );
        self.canvas.add_annotation(annotation);
        self.state = InteractionState::Idle;
        self.repaint = true;
    }

    fn select(&mut self, shape_id: ShapeId) {
        if !self.canvas.is_selected(shape_id) {
            self.canvas.select(shape_id);
            self.repaint = true;
        }
    }

    fn set_state(&mut self, state: InteractionState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&state) {
            log::debug!("State {} -> {}", self.state.name(), state.name());
        }
        self.state = state;
    }
}
