//! Cursor: JSON server file plus a `.md` or `.mdc` rules file

use agentsync_content::Section;
use agentsync_fs::NormalizedPath;
use agentsync_meta::{AgentSyncConfig, ServerRegistry, TargetConfig, TargetKind};

use crate::error::Result;
use crate::integration::{
    Artifact, ArtifactKind, ServerFileState, TargetIntegration, read_json_servers,
};
use crate::writer::{render_mcp_json, render_rules};

pub struct CursorIntegration {
    name: String,
    target: TargetConfig,
    mcp_path: Option<NormalizedPath>,
    rules_path: Option<NormalizedPath>,
}

impl CursorIntegration {
    pub fn new(name: impl Into<String>, target: &TargetConfig, config: &AgentSyncConfig) -> Self {
        Self {
            name: name.into(),
            target: target.clone(),
            mcp_path: target.mcp_path.as_deref().map(|p| config.resolve(p)),
            rules_path: target.rules_path.as_deref().map(|p| config.resolve(p)),
        }
    }
}

impl TargetIntegration for CursorIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Cursor
    }

    fn config(&self) -> &TargetConfig {
        &self.target
    }

    fn servers_path(&self) -> Option<&NormalizedPath> {
        self.mcp_path.as_ref()
    }

    fn rules_path(&self) -> Option<&NormalizedPath> {
        self.rules_path.as_ref()
    }

    fn plan_servers(&self, servers: &ServerRegistry) -> Result<Option<Artifact>> {
        let Some(path) = &self.mcp_path else {
            return Ok(None);
        };
        let content = render_mcp_json(servers)?;
        Ok(Some(Artifact::replace(ArtifactKind::Servers, path.clone(), content)))
    }

    fn plan_rules(&self, sections: &[Section]) -> Option<Artifact> {
        let path = self.rules_path.as_ref()?;
        let content = render_rules(sections, self.target.rules_format)?;
        Some(Artifact::replace(ArtifactKind::Rules, path.clone(), content))
    }

    fn read_servers(&self) -> Result<ServerFileState> {
        read_json_servers(self.mcp_path.as_ref())
    }
}
