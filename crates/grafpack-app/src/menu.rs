//! Menu bar registry.

use grafpack_core::{Command, RotatePreset, ShapeKind};
use std::path::PathBuf;

/// What a menu entry does when chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Issue a controller command.
    Run(Command),
    /// Export the canvas; the target file is chosen by the user.
    ExportToJpeg,
}

/// A menu entry, addressed by its slash-separated path.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub path: String,
    pub action: MenuAction,
}

impl MenuItem {
    fn new(path: impl Into<String>, action: MenuAction) -> Self {
        Self {
            path: path.into(),
            action,
        }
    }

    /// The command this entry issues. Export entries need a target `file`.
    pub fn command(&self, file: Option<PathBuf>) -> Option<Command> {
        match &self.action {
            MenuAction::Run(command) => Some(command.clone()),
            MenuAction::ExportToJpeg => file.map(Command::ExportToImage),
        }
    }
}

/// Registry of the editor's menu bar.
pub struct MenuRegistry;

impl MenuRegistry {
    /// Get all menu entries in menu bar order.
    pub fn all() -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = ShapeKind::ALL
            .into_iter()
            .map(|kind| {
                MenuItem::new(
                    format!("Create/{kind}"),
                    MenuAction::Run(Command::Create(kind)),
                )
            })
            .collect();
        items.push(MenuItem::new("Select", MenuAction::Run(Command::Select)));
        items.push(MenuItem::new("Move", MenuAction::Run(Command::Move)));
        items.extend(RotatePreset::ALL.into_iter().map(|preset| {
            MenuItem::new(
                format!("Rotate/{} Degrees", preset.degrees()),
                MenuAction::Run(Command::Rotate(preset)),
            )
        }));
        items.push(MenuItem::new("Text Annotation", MenuAction::Run(Command::TextAnnotation)));
        items.push(MenuItem::new("Delete", MenuAction::Run(Command::Delete)));
        items.push(MenuItem::new("Export to JPEG", MenuAction::ExportToJpeg));
        items.push(MenuItem::new("Exit", MenuAction::Run(Command::Exit)));
        items
    }

    /// Find an entry by path, ignoring ASCII case.
    pub fn resolve(path: &str) -> Option<MenuItem> {
        let path = path.trim();
        Self::all()
            .into_iter()
            .find(|item| item.path.eq_ignore_ascii_case(path))
    }

    /// Print the menu tree to the console.
    pub fn print_all() {
        println!("\n=== Menu ===");
        for item in Self::all() {
            println!("  {}", item.path);
        }
        println!();
    }
}
