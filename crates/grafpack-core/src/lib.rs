//! GrafPack Core Library
//!
//! Shape model, geometry engine and interaction controller for the GrafPack
//! vector-shape editor. Rendering lives in `grafpack-render`.

pub mod canvas;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod shapes;

pub use canvas::{Annotation, Canvas, CanvasDocument};
pub use command::{Command, CommandOutcome, RotatePreset};
pub use config::{EditorConfig, ModifierKey, SquarePivot};
pub use controller::{Controller, InteractionState};
pub use error::{EditorError, EditorResult};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use shapes::{Shape, ShapeFactory, ShapeId, ShapeKind, ShapeTrait};
