//! Menu commands issued by the host shell.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed rotation angles offered by the Rotate menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotatePreset {
    Deg45,
    Deg90,
    Deg135,
}

impl RotatePreset {
    pub const ALL: [RotatePreset; 3] = [
        RotatePreset::Deg45,
        RotatePreset::Deg90,
        RotatePreset::Deg135,
    ];

    /// Angle in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            RotatePreset::Deg45 => 45.0,
            RotatePreset::Deg90 => 90.0,
            RotatePreset::Deg135 => 135.0,
        }
    }
}

/// A command from the menu bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Arm the controller to create a shape on the next press.
    Create(ShapeKind),
    /// Return to plain selection mode.
    Select,
    /// Check that there is something to drag.
    Move,
    /// Rotate the selection by a preset angle.
    Rotate(RotatePreset),
    /// Start placing a text label.
    TextAnnotation,
    /// Remove the selected shape.
    Delete,
    Exit,
    /// Ask the host to export the canvas to an image file.
    ExportToImage(PathBuf),
}

/// What the host should do after a command was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Exit,
    /// The host should render the canvas to this path.
    ExportRequested(PathBuf),
}
