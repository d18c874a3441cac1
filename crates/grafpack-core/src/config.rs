//! Editor configuration.

use crate::input::Modifiers;
use serde::{Deserialize, Serialize};

/// Modifier key that turns a drag gesture into a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModifierKey {
    Shift,
    #[default]
    Ctrl,
    Alt,
    Meta,
}

impl ModifierKey {
    /// Check whether this key is held in the given modifier state.
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            ModifierKey::Shift => modifiers.shift,
            ModifierKey::Ctrl => modifiers.ctrl,
            ModifierKey::Alt => modifiers.alt,
            ModifierKey::Meta => modifiers.meta,
        }
    }
}

/// Pivot rule for square rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SquarePivot {
    /// Always rotate about the midpoint of the two corners.
    #[default]
    Midpoint,
    /// The first rotation pivots on the anchor point, later ones on the midpoint.
    ///
    /// The pivot is taken at press time, before the side length is known.
    LegacyAnchor,
}

/// Behavioural settings for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Modifier that switches a pointer drag to rotation.
    pub rotate_modifier: ModifierKey,
    /// Rotation pivot rule for newly created squares.
    pub square_pivot: SquarePivot,
}
