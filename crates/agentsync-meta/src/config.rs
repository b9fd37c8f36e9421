//! Typed `agentsync.yaml` configuration
//!
//! These are the validated forms produced by [`crate::loader`]. Paths are kept
//! as written and resolved on demand against the config directory.

use std::fmt;
use std::str::FromStr;

use agentsync_fs::{NormalizedPath, resolve_path};
use indexmap::IndexMap;

use crate::error::Error;

/// The only supported `version` value.
pub const SUPPORTED_VERSION: i64 = 1;

/// Consumer tool a target writes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Cursor,
    Codex,
    Antigravity,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [Self::Antigravity, Self::Codex, Self::Cursor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Codex => "codex",
            Self::Antigravity => "antigravity",
        }
    }
}

impl FromStr for TargetKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cursor" => Ok(Self::Cursor),
            "codex" => Ok(Self::Codex),
            "antigravity" => Ok(Self::Antigravity),
            other => Err(Error::invalid(format!(
                "unknown type '{other}'. Supported: {}",
                Self::ALL.map(|k| k.as_str()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rules file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulesFormat {
    /// Bare Markdown
    #[default]
    Md,
    /// Markdown behind a YAML front-matter prologue (Cursor `.mdc`)
    Mdc,
}

impl FromStr for RulesFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "md" => Ok(Self::Md),
            "mdc" => Ok(Self::Mdc),
            other => Err(Error::invalid(format!(
                "rules_format must be 'md' or 'mdc', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RulesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md => write!(f, "md"),
            Self::Mdc => write!(f, "mdc"),
        }
    }
}

/// Server transport, used for protocol allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Local process (`command` key)
    Stdio,
    /// Remote endpoint (`url` key)
    Http,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            _ => Err(Error::invalid(format!(
                "unknown protocol '{s}'. Supported: stdio, http"
            ))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Where the source of truth lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub global_config: String,
    pub project_mcp: String,
    pub rules_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            global_config: "~/.claude.json".to_string(),
            project_mcp: ".mcp.json".to_string(),
            rules_file: "CLAUDE.md".to_string(),
        }
    }
}

/// One configured target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub kind: TargetKind,
    /// JSON server file (Cursor, Antigravity)
    pub mcp_path: Option<String>,
    /// TOML config holding the managed block (Codex)
    pub config_path: Option<String>,
    pub rules_path: Option<String>,
    pub rules_format: RulesFormat,
    pub exclude_servers: Vec<String>,
    pub protocols: Vec<Protocol>,
}

impl TargetConfig {
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            mcp_path: None,
            config_path: None,
            rules_path: None,
            rules_format: RulesFormat::default(),
            exclude_servers: Vec::new(),
            protocols: Vec::new(),
        }
    }

    /// Protocol allow-list actually applied to this target.
    ///
    /// Antigravity only runs local servers, so it is limited to stdio when no
    /// list is configured.
    pub fn effective_protocols(&self) -> Vec<Protocol> {
        if self.protocols.is_empty() && self.kind == TargetKind::Antigravity {
            vec![Protocol::Stdio]
        } else {
            self.protocols.clone()
        }
    }
}

/// Rules filtering applied to every target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RulesConfig {
    pub exclude_sections: Vec<String>,
}

/// Backup and log settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub backup: bool,
    pub backup_dir: String,
    pub log_dir: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            backup: true,
            backup_dir: ".agentsync/backups".to_string(),
            log_dir: ".agentsync/logs".to_string(),
        }
    }
}

/// A loaded and validated `agentsync.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSyncConfig {
    pub version: i64,
    pub source: SourceConfig,
    /// Targets in file order.
    pub targets: IndexMap<String, TargetConfig>,
    pub rules: RulesConfig,
    pub sync: SyncSettings,
    /// Canonical directory holding the config file.
    pub config_dir: NormalizedPath,
}

impl AgentSyncConfig {
    /// Empty configuration rooted at `config_dir`, mostly useful for tests.
    pub fn new(config_dir: NormalizedPath) -> Self {
        Self {
            version: SUPPORTED_VERSION,
            source: SourceConfig::default(),
            targets: IndexMap::new(),
            rules: RulesConfig::default(),
            sync: SyncSettings::default(),
            config_dir,
        }
    }

    /// Resolve a configured path against the config directory.
    pub fn resolve(&self, path: &str) -> NormalizedPath {
        resolve_path(path, &self.config_dir)
    }

    /// Backup directory, or `None` when backups are disabled.
    pub fn backup_dir(&self) -> Option<NormalizedPath> {
        self.sync
            .backup
            .then(|| self.resolve(&self.sync.backup_dir))
    }

    pub fn log_dir(&self) -> NormalizedPath {
        self.resolve(&self.sync.log_dir)
    }

    pub fn target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.get(name)
    }
}
