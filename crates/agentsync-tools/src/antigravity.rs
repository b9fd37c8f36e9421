//! Antigravity: JSON server file only, stdio servers only by default

use agentsync_content::Section;
use agentsync_fs::NormalizedPath;
use agentsync_meta::{AgentSyncConfig, ServerRegistry, TargetConfig, TargetKind};

use crate::error::Result;
use crate::integration::{
    Artifact, ArtifactKind, ServerFileState, TargetIntegration, read_json_servers,
};
use crate::writer::render_mcp_json;

pub struct AntigravityIntegration {
    name: String,
    target: TargetConfig,
    mcp_path: Option<NormalizedPath>,
}

impl AntigravityIntegration {
    pub fn new(name: impl Into<String>, target: &TargetConfig, config: &AgentSyncConfig) -> Self {
        let name = name.into();
        if target.rules_path.is_some() {
            tracing::warn!(target = %name, "Antigravity does not read rules, ignoring rules_path");
        }
        Self {
            name,
            target: target.clone(),
            mcp_path: target.mcp_path.as_deref().map(|p| config.resolve(p)),
        }
    }
}

impl TargetIntegration for AntigravityIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Antigravity
    }

    fn config(&self) -> &TargetConfig {
        &self.target
    }

    fn servers_path(&self) -> Option<&NormalizedPath> {
        self.mcp_path.as_ref()
    }

    fn rules_path(&self) -> Option<&NormalizedPath> {
        None
    }

    fn supports_rules(&self) -> bool {
        false
    }

    fn plan_servers(&self, servers: &ServerRegistry) -> Result<Option<Artifact>> {
        let Some(path) = &self.mcp_path else {
            return Ok(None);
        };
        let content = render_mcp_json(servers)?;
        Ok(Some(Artifact::replace(ArtifactKind::Servers, path.clone(), content)))
    }

    fn plan_rules(&self, _sections: &[Section]) -> Option<Artifact> {
        None
    }

    fn read_servers(&self) -> Result<ServerFileState> {
        read_json_servers(self.mcp_path.as_ref())
    }
}
