//! GrafPack - replay an editing session and write its exports.

use anyhow::{Context, Result};
use clap::Parser;
use grafpack_app::{App, AppConfig, MenuRegistry, SessionScript};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grafpack", version, about = "Replay a GrafPack editing session")]
struct Cli {
    /// Session script (JSON) to replay
    #[arg(required_unless_present = "list_menu")]
    script: Option<PathBuf>,

    /// Application config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Print the menu entries usable in scripts and exit
    #[arg(long)]
    list_menu: bool,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    AppConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

fn load_script(path: &Path) -> Result<SessionScript> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    SessionScript::from_json(&json).with_context(|| format!("Invalid script {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_menu {
        MenuRegistry::print_all();
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    let script_path = cli.script.context("No session script given")?;
    let script = load_script(&script_path)?;

    log::info!("Starting {}", config.title);
    let mut app = App::new(config).context("Failed to create the canvas")?;
    let summary = app.run_script(&script);
    log::info!(
        "Replayed {} steps: {} warnings, {} errors, {} exports",
        summary.steps_run,
        summary.warnings,
        summary.errors,
        summary.exports.len()
    );
    Ok(())
}
