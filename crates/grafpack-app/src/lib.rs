//! GrafPack Application
//!
//! Headless application shell: replays a session of menu commands, pointer
//! drags and key presses through the interaction controller, repaints after
//! each change and writes the requested exports.

mod app;
mod menu;
mod script;

pub use app::{App, AppConfig, AppError, ReplaySummary, SerializableColor};
pub use menu::{MenuAction, MenuItem, MenuRegistry};
pub use script::{DragStep, SessionScript, Step};
