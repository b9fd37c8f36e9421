//! Status command implementation

use std::path::Path;

use colored::Colorize;

use agentsync_core::{SyncLog, collect_status};

use crate::commands::validate::describe_finding;
use crate::commands::{Ui, load_config};
use crate::error::Result;

/// Run the status command
///
/// Read-only overview: which sources exist and whether each target is in
/// sync with them.
pub fn run_status(config_path: Option<&Path>, ui: &Ui) -> Result<()> {
    let config = load_config(config_path)?;
    let status = collect_status(&config, &mut SyncLog::new(false));

    ui.say(format!("{} {}", "Project:".bold(), status.config_dir));
    ui.say("");
    ui.say("Sources:".bold());
    for source in &status.sources {
        let mark = if source.exists {
            "found".green()
        } else {
            "missing".yellow()
        };
        ui.say(format!("   {:<14} {} ({mark})", source.label, source.path));
    }

    ui.say("");
    ui.say("Targets:".bold());
    for target in &status.targets {
        let state = if target.in_sync() {
            "in sync".green()
        } else {
            "out of sync".red()
        };
        ui.say(format!("   {} [{}] {state}", target.name.cyan(), target.kind));
        if let Some(path) = &target.servers_path {
            ui.say(format!("      servers: {path}"));
        }
        if let Some(path) = &target.rules_path {
            ui.say(format!("      rules:   {path}"));
        }
        for finding in target
            .findings
            .iter()
            .filter(|f| !f.passed || ui.verbose())
        {
            ui.say(format!("      {}", describe_finding(finding)));
        }
    }

    Ok(())
}
