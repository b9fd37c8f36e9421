//! Summary shown by `agentsync status`

use agentsync_fs::NormalizedPath;
use agentsync_meta::{AgentSyncConfig, TargetKind};

use crate::log::SyncLog;
use crate::validate::{Finding, Validator};

/// Presence of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub label: &'static str,
    pub path: NormalizedPath,
    pub exists: bool,
}

/// Per-target validation summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    pub name: String,
    pub kind: TargetKind,
    pub servers_path: Option<NormalizedPath>,
    pub rules_path: Option<NormalizedPath>,
    pub findings: Vec<Finding>,
}

impl TargetStatus {
    pub fn in_sync(&self) -> bool {
        self.findings.iter().all(|f| f.passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub config_dir: NormalizedPath,
    pub sources: Vec<SourceStatus>,
    pub targets: Vec<TargetStatus>,
}

/// Collect source presence and validate every configured target.
pub fn collect_status(config: &AgentSyncConfig, log: &mut SyncLog) -> StatusReport {
    let validator = Validator::new(config);
    let source = validator.source();

    let sources = [
        ("global config", &source.global_config),
        ("project MCP", &source.project_mcp),
        ("rules", &source.rules_file),
    ]
    .into_iter()
    .map(|(label, path)| SourceStatus {
        label,
        path: path.clone(),
        exists: path.is_file(),
    })
    .collect();

    let registry = source.load_servers(log);
    let targets = validator
        .dispatcher()
        .iter()
        .map(|integration| TargetStatus {
            name: integration.name().to_string(),
            kind: integration.kind(),
            servers_path: integration.servers_path().cloned(),
            rules_path: integration
                .supports_rules()
                .then(|| integration.rules_path().cloned())
                .flatten(),
            findings: validator.validate_target(integration, &registry),
        })
        .collect();

    StatusReport {
        config_dir: config.config_dir.clone(),
        sources,
        targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentsync_meta::TargetConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_reports_sources_and_targets() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("CLAUDE.md"), "## Usage\n").unwrap();

        let mut config = AgentSyncConfig::new(NormalizedPath::new(temp.path()));
        config.source.global_config = "claude.json".to_string();
        let mut cursor = TargetConfig::new(TargetKind::Cursor);
        cursor.mcp_path = Some(".cursor/mcp.json".to_string());
        config.targets.insert("cursor".to_string(), cursor);

        let status = collect_status(&config, &mut SyncLog::new(false));

        let present: Vec<bool> = status.sources.iter().map(|s| s.exists).collect();
        assert_eq!(present, vec![false, false, true]);
        assert_eq!(status.targets.len(), 1);
        assert!(status.targets[0].in_sync());
        assert!(status.targets[0].findings[0].message.contains("does not exist yet"));
    }
}
