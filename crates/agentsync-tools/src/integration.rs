//! TargetIntegration trait and the artifacts a sync plans

use agentsync_blocks::{Markers, merge_managed_block};
use agentsync_content::Section;
use agentsync_fs::NormalizedPath;
use agentsync_meta::{Protocol, ServerRegistry, TargetConfig, TargetKind};

use crate::error::{Error, Result};
use crate::writer::parse_mcp_json;

/// Which part of the source of truth an artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Servers,
    Rules,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Servers => write!(f, "servers"),
            Self::Rules => write!(f, "rules"),
        }
    }
}

/// How generated content lands in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// The whole file is generated.
    Replace(String),
    /// Only the sentinel-delimited block is generated; the rest of the file
    /// belongs to the user.
    MergeBlock { block: String, markers: Markers },
}

/// A file a sync will write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: NormalizedPath,
    pub content: ArtifactContent,
}

impl Artifact {
    pub fn replace(kind: ArtifactKind, path: NormalizedPath, content: String) -> Self {
        Self {
            kind,
            path,
            content: ArtifactContent::Replace(content),
        }
    }

    pub fn merge_block(
        kind: ArtifactKind,
        path: NormalizedPath,
        block: String,
        markers: Markers,
    ) -> Self {
        Self {
            kind,
            path,
            content: ArtifactContent::MergeBlock { block, markers },
        }
    }

    /// Whether the current file content is needed to produce the final text.
    pub fn needs_existing(&self) -> bool {
        matches!(self.content, ArtifactContent::MergeBlock { .. })
    }

    /// Final file text given what is currently on disk.
    pub fn final_content(&self, existing: Option<&str>) -> String {
        match &self.content {
            ArtifactContent::Replace(content) => content.clone(),
            ArtifactContent::MergeBlock { block, markers } => {
                merge_managed_block(existing, block, *markers)
            }
        }
    }
}

/// What a target's server file currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFileState {
    /// No server path configured for this target.
    NotConfigured,
    /// Configured but not written yet.
    Missing(NormalizedPath),
    /// The file exists but has no managed block.
    Unmanaged(NormalizedPath),
    /// Server names as they appear in the file.
    Present {
        path: NormalizedPath,
        names: Vec<String>,
    },
}

/// One configured target.
pub trait TargetIntegration {
    /// Target name from `agentsync.yaml`.
    fn name(&self) -> &str;

    fn kind(&self) -> TargetKind;

    fn config(&self) -> &TargetConfig;

    /// Resolved server file path, if any.
    fn servers_path(&self) -> Option<&NormalizedPath>;

    /// Resolved rules file path, if any.
    fn rules_path(&self) -> Option<&NormalizedPath>;

    /// Whether this tool consumes a rules file at all.
    fn supports_rules(&self) -> bool {
        true
    }

    /// Protocol allow-list applied when filtering servers for this target.
    fn protocols(&self) -> Vec<Protocol> {
        self.config().effective_protocols()
    }

    /// Name a server identity is written under in this target's file.
    fn written_name(&self, identity: &str) -> String {
        identity.to_string()
    }

    /// Server artifact for an already filtered registry.
    ///
    /// `None` when no server path is configured.
    fn plan_servers(&self, servers: &ServerRegistry) -> Result<Option<Artifact>>;

    /// Rules artifact for already filtered sections.
    ///
    /// `None` when rules are unsupported, no path is configured, or there is
    /// nothing to write.
    fn plan_rules(&self, sections: &[Section]) -> Option<Artifact>;

    /// Read the server file back.
    fn read_servers(&self) -> Result<ServerFileState>;
}

/// Read a JSON server file shared by the JSON-based targets.
pub(crate) fn read_json_servers(path: Option<&NormalizedPath>) -> Result<ServerFileState> {
    let Some(path) = path else {
        return Ok(ServerFileState::NotConfigured);
    };
    let Some(content) = agentsync_fs::io::read_text_if_exists(path)? else {
        return Ok(ServerFileState::Missing(path.clone()));
    };

    let names = parse_mcp_json(&content).map_err(|source| Error::InvalidJson {
        path: path.to_native(),
        source,
    })?;
    Ok(ServerFileState::Present {
        path: path.clone(),
        names,
    })
}
