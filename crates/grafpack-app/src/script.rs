//! Session scripts: recorded user input replayed against the editor.

use grafpack_core::{Command, KeyEvent, Modifiers, MouseButton, PointerEvent};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::iter;
use std::path::PathBuf;

/// Largest number of moves a scripted drag may expand into.
pub const MAX_DRAG_STEPS: u32 = 10_000;

fn default_drag_steps() -> u32 {
    1
}

/// A pointer drag from press to release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragStep {
    pub from: Point,
    pub to: Point,
    /// Number of intermediate pointer moves.
    #[serde(default = "default_drag_steps")]
    pub steps: u32,
    /// Modifiers held at press time.
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl DragStep {
    /// Expand into a press, `steps` evenly spaced moves ending at `to`, and a release.
    ///
    /// Events are produced lazily; callers bound `steps` with [`MAX_DRAG_STEPS`].
    pub fn events(&self) -> impl Iterator<Item = PointerEvent> + use<> {
        let DragStep {
            from,
            to,
            modifiers,
            ..
        } = *self;
        let steps = self.steps.max(1);
        let press = PointerEvent::Down {
            position: from,
            button: MouseButton::Left,
            modifiers,
        };
        let moves = (1..=steps).map(move |i| PointerEvent::Move {
            position: from.lerp(to, f64::from(i) / f64::from(steps)),
        });
        let release = PointerEvent::Up {
            position: to,
            button: MouseButton::Left,
        };
        iter::once(press).chain(moves).chain(iter::once(release))
    }
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Command {
        command: Command,
    },
    /// A menu entry by path. `path` names the target file of an export entry.
    Menu {
        menu: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
    Pointer {
        pointer: PointerEvent,
    },
    Key {
        key: KeyEvent,
    },
    Drag {
        drag: DragStep,
    },
}

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub steps: Vec<Step>,
}

impl SessionScript {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the script to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
