//! Codex: managed block inside `config.toml` plus a Markdown rules file
//!
//! Codex's `config.toml` also holds the user's own settings, so only the
//! block between the sentinels is regenerated.

use agentsync_blocks::{TOML_MARKERS, find_managed_block};
use agentsync_content::Section;
use agentsync_fs::{NormalizedPath, io};
use agentsync_meta::{AgentSyncConfig, RulesFormat, ServerRegistry, TargetConfig, TargetKind};

use crate::error::{Error, Result};
use crate::integration::{Artifact, ArtifactKind, ServerFileState, TargetIntegration};
use crate::writer::{canonical_name, extract_table_names, render_codex_servers, render_rules};

pub struct CodexIntegration {
    name: String,
    target: TargetConfig,
    config_path: Option<NormalizedPath>,
    rules_path: Option<NormalizedPath>,
}

impl CodexIntegration {
    pub fn new(name: impl Into<String>, target: &TargetConfig, config: &AgentSyncConfig) -> Self {
        let name = name.into();
        if target.rules_format == RulesFormat::Mdc {
            tracing::warn!(target = %name, "Codex reads plain Markdown, ignoring rules_format mdc");
        }
        Self {
            name,
            target: target.clone(),
            config_path: target.config_path.as_deref().map(|p| config.resolve(p)),
            rules_path: target.rules_path.as_deref().map(|p| config.resolve(p)),
        }
    }
}

impl TargetIntegration for CodexIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Codex
    }

    fn config(&self) -> &TargetConfig {
        &self.target
    }

    fn servers_path(&self) -> Option<&NormalizedPath> {
        self.config_path.as_ref()
    }

    fn rules_path(&self) -> Option<&NormalizedPath> {
        self.rules_path.as_ref()
    }

    fn written_name(&self, identity: &str) -> String {
        canonical_name(identity)
    }

    fn plan_servers(&self, servers: &ServerRegistry) -> Result<Option<Artifact>> {
        let Some(path) = &self.config_path else {
            return Ok(None);
        };
        let block = render_codex_servers(servers)?;
        Ok(Some(Artifact::merge_block(
            ArtifactKind::Servers,
            path.clone(),
            block,
            TOML_MARKERS,
        )))
    }

    fn plan_rules(&self, sections: &[Section]) -> Option<Artifact> {
        let path = self.rules_path.as_ref()?;
        let content = render_rules(sections, RulesFormat::Md)?;
        Some(Artifact::replace(ArtifactKind::Rules, path.clone(), content))
    }

    /// Only tables inside the managed block count; the user's own
    /// `[mcp_servers.*]` tables outside it are not agentsync's.
    fn read_servers(&self) -> Result<ServerFileState> {
        let Some(path) = &self.config_path else {
            return Ok(ServerFileState::NotConfigured);
        };
        let Some(content) = io::read_text_if_exists(path)? else {
            return Ok(ServerFileState::Missing(path.clone()));
        };

        Ok(match find_managed_block(&content, TOML_MARKERS) {
            Some(block) => ServerFileState::Present {
                path: path.clone(),
                names: extract_table_names(&block.inner).map_err(|source| {
                    Error::InvalidToml {
                        path: path.to_native(),
                        source,
                    }
                })?,
            },
            None => ServerFileState::Unmanaged(path.clone()),
        })
    }
}
