//! Validate command implementation

use std::path::Path;

use colored::Colorize;

use agentsync_core::{Finding, Severity, SyncLog, Validator};

use crate::commands::{Ui, load_config};
use crate::error::{CliError, Result};

/// Run the validate command
///
/// Prints failed checks and warnings; passing checks only with `--verbose`.
pub fn run_validate(config_path: Option<&Path>, target: Option<&str>, ui: &Ui) -> Result<()> {
    let config = load_config(config_path)?;

    ui.say(format!("{} Validating targets...", "=>".blue().bold()));

    let mut log = SyncLog::new(false);
    let report = Validator::new(&config).run(target, &mut log)?;

    for finding in &report.findings {
        if !finding.passed || finding.severity == Severity::Warning || ui.verbose() {
            ui.say(format!("   {}", describe_finding(finding)));
        }
    }

    let failures = report.failures().count();
    ui.say("");
    if report.passed {
        ui.say(format!(
            "{} All {} checks passed.",
            "OK".green().bold(),
            report.findings.len()
        ));
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Validation failed: {failures} of {} checks failed",
            report.findings.len()
        )))
    }
}

pub(crate) fn describe_finding(finding: &Finding) -> String {
    let marker = match (finding.passed, finding.severity) {
        (false, _) => "FAIL".red().bold(),
        (true, Severity::Warning) => "WARN".yellow().bold(),
        (true, _) => "PASS".green(),
    };
    format!("{marker} {}: {}", finding.name, finding.message)
}
