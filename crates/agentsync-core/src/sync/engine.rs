//! SyncEngine implementation
//!
//! One pass per invocation: load the sources, then for every selected target
//! filter, generate and write. A failing target is recorded in its own
//! report and never stops the others.

use agentsync_content::{Section, filter_sections};
use agentsync_fs::{FileWriter, WriteAction, WriteMode, WriteOutcome, io};
use agentsync_meta::{AgentSyncConfig, ServerRegistry};
use agentsync_tools::{Artifact, ServerFileState, TargetDispatcher, TargetIntegration};

use crate::error::{Error, Result};
use crate::filter::{filter_servers, select_targets};
use crate::log::SyncLog;
use crate::source::ClaudeSource;

use super::diff::ServerDiff;

/// Options for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Compute outcomes without touching the disk.
    pub dry_run: bool,
    /// Skip the rules phase.
    pub mcp_only: bool,
    /// Skip the MCP phase.
    pub rules_only: bool,
    /// Only sync this target.
    pub target: Option<String>,
    /// Back up existing files before overwriting, if enabled in the config.
    pub backup: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            mcp_only: false,
            rules_only: false,
            target: None,
            backup: true,
        }
    }
}

/// Result for a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub name: String,
    pub success: bool,
    /// Every write performed (or simulated) for this target.
    pub writes: Vec<WriteOutcome>,
    pub errors: Vec<String>,
}

impl TargetReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            writes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn record_error(&mut self, phase: &str, error: Error, log: &mut SyncLog) {
        let message = format!("{phase} sync failed: {error}");
        log.error(format!("{}: {message}", self.name));
        self.errors.push(message);
        self.success = false;
    }
}

/// Report from a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// True when every target succeeded.
    pub success: bool,
    pub dry_run: bool,
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    /// Writes that changed (or would change) a file.
    pub fn changes(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.targets
            .iter()
            .flat_map(|t| t.writes.iter())
            .filter(|w| w.changed())
    }

    pub fn failed_targets(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(|t| !t.success)
    }
}

/// Engine reconciling configured targets with the Claude sources
pub struct SyncEngine<'a> {
    config: &'a AgentSyncConfig,
    dispatcher: TargetDispatcher,
    source: ClaudeSource,
}

impl<'a> SyncEngine<'a> {
    pub fn new(config: &'a AgentSyncConfig) -> Self {
        Self {
            config,
            dispatcher: TargetDispatcher::from_config(config),
            source: ClaudeSource::from_config(config),
        }
    }

    /// Run one sync pass.
    ///
    /// # Errors
    ///
    /// Returns an error before any target is touched when both phases are
    /// skipped, no targets are configured, or `options.target` is unknown.
    /// Failures inside a target end up in its [`TargetReport`].
    pub fn run(&self, options: &SyncOptions, log: &mut SyncLog) -> Result<SyncReport> {
        if options.mcp_only && options.rules_only {
            return Err(Error::NothingToSync);
        }
        let targets = select_targets(&self.dispatcher, options.target.as_deref())?;

        log.section(format!(
            "agentsync {} ({} targets)",
            if options.dry_run { "dry run" } else { "sync" },
            targets.len()
        ));

        let registry = if options.rules_only {
            ServerRegistry::new()
        } else {
            log.section("Loading MCP servers");
            self.source.load_servers(log)
        };

        let sections = if options.mcp_only {
            Vec::new()
        } else {
            log.section("Loading rules");
            self.load_sections(log)
        };

        let writer = self.file_writer(options);
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            log.section(format!("Target: {} ({})", target.name(), target.kind()));
            let mut report = TargetReport::new(target.name());

            if !options.rules_only
                && let Err(e) = self.sync_servers(target, &registry, &writer, &mut report, log)
            {
                report.record_error("MCP", e, log);
            }
            if !options.mcp_only
                && let Err(e) = self.sync_rules(target, &sections, &writer, &mut report, log)
            {
                report.record_error("Rules", e, log);
            }

            reports.push(report);
        }

        let success = reports.iter().all(|r| r.success);
        log.section(if success {
            "Sync complete".to_string()
        } else {
            format!(
                "Sync finished with errors in {} targets",
                reports.iter().filter(|r| !r.success).count()
            )
        });

        Ok(SyncReport {
            success,
            dry_run: options.dry_run,
            targets: reports,
        })
    }

    fn file_writer(&self, options: &SyncOptions) -> FileWriter {
        let mode = if options.dry_run {
            WriteMode::Simulate
        } else {
            WriteMode::Apply
        };
        let writer = FileWriter::new(mode);
        match self.config.backup_dir() {
            Some(dir) if options.backup => writer.with_backup_dir(dir),
            _ => writer,
        }
    }

    fn load_sections(&self, log: &mut SyncLog) -> Vec<Section> {
        let sections = self.source.load_rules(log);
        let excluded = &self.config.rules.exclude_sections;
        let kept = filter_sections(&sections, excluded);
        if kept.len() != sections.len() {
            log.info(format!(
                "Excluded {} sections ({} remain)",
                sections.len() - kept.len(),
                kept.len()
            ));
        }
        kept
    }

    fn sync_servers(
        &self,
        target: &dyn TargetIntegration,
        registry: &ServerRegistry,
        writer: &FileWriter,
        report: &mut TargetReport,
        log: &mut SyncLog,
    ) -> Result<()> {
        if registry.is_empty() {
            log.warn("No MCP servers found in sources, skipping MCP sync");
            return Ok(());
        }

        let filtered = filter_servers(
            registry,
            &target.config().exclude_servers,
            &target.protocols(),
        );
        if filtered.len() != registry.len() {
            let dropped: Vec<&str> = registry
                .identities()
                .filter(|identity| !filtered.contains(identity))
                .collect();
            log.info(format!(
                "Filtered out {} servers ({})",
                dropped.len(),
                dropped.join(", ")
            ));
        }

        let Some(artifact) = target.plan_servers(&filtered)? else {
            log.info("No MCP path configured, skipping");
            return Ok(());
        };

        let next: Vec<String> = filtered
            .identities()
            .map(|identity| target.written_name(identity))
            .collect();
        match target.read_servers() {
            Ok(ServerFileState::Present { names, .. }) => {
                log.info(ServerDiff::between(&names, &next).summary());
            }
            Ok(ServerFileState::Unmanaged(_)) => log.info(format!(
                "no managed block yet, will add {} servers",
                next.len()
            )),
            Ok(_) => log.info(format!(
                "file doesn't exist yet, will create with {} servers",
                next.len()
            )),
            Err(e) => log.warn(format!("Existing server file unreadable, replacing it: {e}")),
        }

        report.writes.push(write_artifact(&artifact, writer, log)?);
        Ok(())
    }

    fn sync_rules(
        &self,
        target: &dyn TargetIntegration,
        sections: &[Section],
        writer: &FileWriter,
        report: &mut TargetReport,
        log: &mut SyncLog,
    ) -> Result<()> {
        if !target.supports_rules() {
            log.info(format!("{} does not use a rules file, skipping", target.kind()));
            return Ok(());
        }
        if sections.is_empty() {
            log.warn("No rules sections to sync, skipping");
            return Ok(());
        }
        let Some(artifact) = target.plan_rules(sections) else {
            log.info("No rules path configured, skipping");
            return Ok(());
        };

        report.writes.push(write_artifact(&artifact, writer, log)?);
        Ok(())
    }
}

fn write_artifact(
    artifact: &Artifact,
    writer: &FileWriter,
    log: &mut SyncLog,
) -> Result<WriteOutcome> {
    let existing = if artifact.needs_existing() {
        io::read_text_if_exists(&artifact.path)?
    } else {
        None
    };
    let content = artifact.final_content(existing.as_deref());
    let outcome = writer.write_or_simulate(&artifact.path, &content)?;

    let path = &outcome.path;
    match (writer.is_simulation(), outcome.action) {
        (_, WriteAction::Unchanged) => log.info(format!("{} unchanged: {path}", artifact.kind)),
        (true, action) => log.info(format!(
            "Would {action} {} file {path} ({} bytes)",
            artifact.kind, outcome.bytes
        )),
        (false, action) => log.info(format!(
            "{} {} file {path} ({} bytes)",
            if action == WriteAction::Create { "Created" } else { "Updated" },
            artifact.kind,
            outcome.bytes
        )),
    }
    if let Some(backup) = &outcome.backup {
        log.info(format!("Backed up previous version to {backup}"));
    }

    Ok(outcome)
}
