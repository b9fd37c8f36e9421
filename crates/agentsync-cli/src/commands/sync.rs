//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use agentsync_core::{LogLevel, SyncEngine, SyncLog, SyncOptions, SyncReport};
use agentsync_fs::{WriteAction, WriteOutcome};

use crate::commands::{Ui, load_config};
use crate::error::{CliError, Result};

/// Flags of `agentsync sync`.
#[derive(Debug, Clone, Default)]
pub struct SyncArgs {
    pub dry_run: bool,
    pub mcp_only: bool,
    pub rules_only: bool,
    pub target: Option<String>,
    pub backup: bool,
}

/// Run the sync command
///
/// Real runs append the run log to the configured log directory. Any failed
/// target makes the command fail after every target has been attempted.
pub fn run_sync(config_path: Option<&Path>, args: SyncArgs, ui: &Ui) -> Result<()> {
    let config = load_config(config_path)?;

    let heading = if args.dry_run {
        "Previewing sync (dry run)..."
    } else {
        "Syncing agent configurations..."
    };
    ui.say(format!("{} {heading}", "=>".blue().bold()));

    let options = SyncOptions {
        dry_run: args.dry_run,
        mcp_only: args.mcp_only,
        rules_only: args.rules_only,
        target: args.target,
        backup: args.backup,
    };
    let mut log = SyncLog::new(options.dry_run);
    let report = SyncEngine::new(&config).run(&options, &mut log)?;

    if !options.dry_run {
        match log.flush_to_file(&config.log_dir()) {
            Ok(Some(path)) if ui.verbose() => ui.say(format!("   Log written to {path}")),
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not write sync log: {e}"),
        }
    }

    print_report(&report, ui);
    let warnings = log.count(LogLevel::Warn);
    if warnings > 0 {
        ui.say(format!("{} {warnings} warning(s) logged", "!".yellow()));
    }

    if report.success {
        Ok(())
    } else {
        let failed: Vec<&str> = report.failed_targets().map(|t| t.name.as_str()).collect();
        Err(CliError::user(format!(
            "Sync failed for {} target(s): {}",
            failed.len(),
            failed.join(", ")
        )))
    }
}

fn print_report(report: &SyncReport, ui: &Ui) {
    for target in &report.targets {
        let status = if target.success {
            "OK".green().bold()
        } else {
            "FAILED".red().bold()
        };
        ui.say(format!("{status} {}", target.name.cyan()));

        for write in &target.writes {
            ui.say(format!("   {}", describe_write(write, report.dry_run)));
        }
        for error in &target.errors {
            ui.say(format!("   {} {error}", "!".red()));
        }
    }

    ui.say("");
    let changed = report.changes().count();
    let summary = match (report.dry_run, changed) {
        (true, 0) => "Dry run: nothing would change.".to_string(),
        (true, n) => format!("Dry run: {n} file(s) would change. No files were written."),
        (false, 0) => "Already in sync. No changes needed.".to_string(),
        (false, n) => format!("Updated {n} file(s)."),
    };
    ui.say(summary);
}

fn describe_write(write: &WriteOutcome, dry_run: bool) -> String {
    let marker = match write.action {
        WriteAction::Create => "+".green(),
        WriteAction::Update => "~".yellow(),
        WriteAction::Unchanged => "=".dimmed(),
    };
    let prefix = if dry_run && write.changed() {
        "would "
    } else {
        ""
    };
    let mut line = format!("{marker} {prefix}{} {}", write.action, write.path);
    if let Some(backup) = &write.backup {
        line.push_str(&format!(" (backup: {backup})"));
    }
    line
}
