//! Init command implementation

use std::path::Path;

use colored::Colorize;

use crate::commands::Ui;
use crate::error::Result;

/// Write the default `agentsync.yaml` into `dir`.
pub fn run_init(dir: &Path, force: bool, ui: &Ui) -> Result<()> {
    let path = agentsync_meta::generate_default_config(dir, force)?;

    ui.say(format!("{} Created {}", "OK".green().bold(), path));
    ui.say("");
    ui.say("Next steps:");
    ui.say(format!("   1. Edit {} to match your setup", "agentsync.yaml".cyan()));
    ui.say(format!("   2. Preview with {}", "agentsync sync --dry-run".cyan()));
    ui.say(format!("   3. Apply with {}", "agentsync sync".cyan()));
    Ok(())
}
