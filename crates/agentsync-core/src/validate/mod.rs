//! Read-back validation of synced targets
//!
//! The validator recomputes what each target should hold from the current
//! sources and compares it with what is on disk. It never writes.

mod checks;

pub use checks::{
    Finding, Severity, check_case_insensitive_duplicates, check_no_excluded_sections,
    check_server_consistency,
};

use agentsync_fs::io;
use agentsync_meta::{AgentSyncConfig, ServerRegistry};
use agentsync_tools::{ServerFileState, TargetDispatcher, TargetIntegration};

use crate::Result;
use crate::filter::select_targets;
use crate::log::SyncLog;
use crate::merge::merge_tiers;
use crate::source::ClaudeSource;

/// All findings of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// True when no finding failed.
    pub passed: bool,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        Self {
            passed: findings.iter().all(|f| f.passed),
            findings,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.passed)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.passed && f.severity == Severity::Warning)
    }
}

/// Compares configured targets with the Claude sources.
pub struct Validator<'a> {
    config: &'a AgentSyncConfig,
    dispatcher: TargetDispatcher,
    source: ClaudeSource,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a AgentSyncConfig) -> Self {
        Self {
            config,
            dispatcher: TargetDispatcher::from_config(config),
            source: ClaudeSource::from_config(config),
        }
    }

    /// Validate every target, or only `target` when given.
    ///
    /// # Errors
    ///
    /// Fails only for configuration problems (unknown target name, no
    /// targets). Inconsistencies are reported as failed findings.
    pub fn run(&self, target: Option<&str>, log: &mut SyncLog) -> Result<ValidationReport> {
        let targets = select_targets(&self.dispatcher, target)?;
        let mut findings = Vec::new();

        let tiers = self.source.load_tiers(log);
        for tier in tiers.iter().filter(|t| !t.servers.is_empty()) {
            let names: Vec<&str> = tier.servers.iter().map(|s| s.name.as_str()).collect();
            findings.push(check_case_insensitive_duplicates(
                &format!("source {}: duplicates", tier.label),
                &names,
            ));
        }
        let registry = merge_tiers(tiers, log);

        for integration in targets {
            findings.extend(self.validate_target(integration, &registry));
        }

        let report = ValidationReport::from_findings(findings);
        tracing::debug!(
            findings = report.findings.len(),
            passed = report.passed,
            "Validation finished"
        );
        Ok(report)
    }

    /// Findings for a single target against an already merged registry.
    pub fn validate_target(
        &self,
        integration: &dyn TargetIntegration,
        registry: &ServerRegistry,
    ) -> Vec<Finding> {
        let name = integration.name();
        let mut findings = Vec::new();

        let servers_check = format!("{name}: MCP servers");
        match integration.read_servers() {
            Ok(ServerFileState::NotConfigured) => {}
            Ok(ServerFileState::Missing(path)) => {
                findings.push(Finding::pass(servers_check, format!("{path} does not exist yet")));
            }
            Ok(ServerFileState::Unmanaged(path)) => {
                findings.push(Finding::warning(
                    servers_check,
                    format!("No agentsync markers found in {path}"),
                ));
            }
            Ok(ServerFileState::Present { names, .. }) => {
                let protocols = integration.protocols();
                findings.push(check_server_consistency(
                    &servers_check,
                    registry,
                    &names,
                    &integration.config().exclude_servers,
                    Some(protocols.as_slice()),
                    |identity| integration.written_name(identity),
                ));
                findings.push(check_case_insensitive_duplicates(
                    &format!("{name}: duplicates"),
                    &names,
                ));
            }
            Err(e) => findings.push(Finding::fail(servers_check, e.to_string())),
        }

        if integration.supports_rules()
            && let Some(path) = integration.rules_path()
        {
            let rules_check = format!("{name}: rules");
            match io::read_text_if_exists(path) {
                Ok(None) => {
                    findings.push(Finding::pass(rules_check, format!("{path} does not exist yet")));
                }
                Ok(Some(content)) => findings.push(check_no_excluded_sections(
                    &rules_check,
                    &content,
                    &self.config.rules.exclude_sections,
                )),
                Err(e) => findings.push(Finding::fail(rules_check, e.to_string())),
            }
        }

        findings
    }

    pub fn dispatcher(&self) -> &TargetDispatcher {
        &self.dispatcher
    }

    pub fn source(&self) -> &ClaudeSource {
        &self.source
    }
}
