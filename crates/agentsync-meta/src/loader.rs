//! Discovery and loading of `agentsync.yaml`
//!
//! The file is read in two passes: `serde_yaml` produces loosely typed raw
//! structs, then a validation pass turns them into an [`AgentSyncConfig`] with
//! error messages that name the offending target.

use std::path::{Path, PathBuf};

use agentsync_fs::{NormalizedPath, io};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use crate::config::{
    AgentSyncConfig, Protocol, RulesConfig, RulesFormat, SUPPORTED_VERSION, SourceConfig,
    SyncSettings, TargetConfig, TargetKind,
};
use crate::{Error, Result};

/// Name of the config file looked up during discovery.
pub const CONFIG_FILENAME: &str = "agentsync.yaml";

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    version: Option<Value>,
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    targets: Option<IndexMap<String, Value>>,
    #[serde(default)]
    rules: Option<RawRules>,
    #[serde(default)]
    sync: Option<RawSync>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    #[serde(rename = "type")]
    kind: Option<String>,
    global_config: Option<String>,
    project_mcp: Option<String>,
    rules_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTarget {
    #[serde(rename = "type")]
    kind: Option<String>,
    mcp_path: Option<String>,
    config_path: Option<String>,
    rules_path: Option<String>,
    rules_format: Option<String>,
    #[serde(default)]
    exclude_servers: Vec<String>,
    #[serde(default)]
    protocols: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRules {
    #[serde(default)]
    exclude_sections: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSync {
    backup: Option<bool>,
    backup_dir: Option<String>,
    log_dir: Option<String>,
}

/// Walk up from `start` looking for `agentsync.yaml`.
pub fn find_config(start: &Path) -> Option<NormalizedPath> {
    let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
        .map(NormalizedPath::new)
}

/// Load from an explicit path, or discover from the working directory.
pub fn load(explicit: Option<&Path>) -> Result<AgentSyncConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let cwd = std::env::current_dir().map_err(|e| agentsync_fs::Error::io(".", e))?;
    match find_config(&cwd) {
        Some(found) => load_config(&found.to_native()),
        None => Err(Error::NotDiscovered {
            filename: CONFIG_FILENAME,
            start: cwd,
        }),
    }
}

/// Load and validate a specific config file.
pub fn load_config(path: &Path) -> Result<AgentSyncConfig> {
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let canonical = dunce::canonicalize(path).map_err(|e| agentsync_fs::Error::io(path, e))?;
    let config_dir = canonical
        .parent()
        .map(NormalizedPath::new)
        .unwrap_or_else(|| NormalizedPath::new("."));

    let text = io::read_text(&NormalizedPath::new(&canonical))?;
    let config = parse_config(&text, config_dir).map_err(|e| match e {
        Error::InvalidYaml { source, .. } => Error::InvalidYaml {
            path: canonical.clone(),
            source,
        },
        other => other,
    })?;

    tracing::debug!(path = %canonical.display(), targets = config.targets.len(), "Loaded config");
    Ok(config)
}

/// Parse and validate config text rooted at `config_dir`.
pub fn parse_config(text: &str, config_dir: NormalizedPath) -> Result<AgentSyncConfig> {
    let value: Value = serde_yaml::from_str(text).map_err(yaml_error)?;
    if !value.is_mapping() {
        return Err(Error::invalid(format!(
            "config file must be a YAML mapping, got {}",
            yaml_kind(&value)
        )));
    }

    let raw: RawConfig = serde_yaml::from_value(value).map_err(yaml_error)?;
    validate(raw, config_dir)
}

fn yaml_error(source: serde_yaml::Error) -> Error {
    Error::InvalidYaml {
        path: PathBuf::from(CONFIG_FILENAME),
        source,
    }
}

fn validate(raw: RawConfig, config_dir: NormalizedPath) -> Result<AgentSyncConfig> {
    let version = match raw.version {
        None | Some(Value::Null) => return Err(Error::invalid("missing required field 'version'")),
        Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or_default(),
        Some(other) => {
            return Err(Error::invalid(format!(
                "'version' must be an integer, got {}",
                yaml_kind(&other)
            )));
        }
    };
    if version != SUPPORTED_VERSION {
        return Err(Error::invalid(format!(
            "unsupported config version {version}. Supported: [{SUPPORTED_VERSION}]"
        )));
    }

    let source = validate_source(raw.source.unwrap_or_default())?;

    let mut targets = IndexMap::new();
    for (name, value) in raw.targets.unwrap_or_default() {
        let target = validate_target(&name, value)?;
        targets.insert(name, target);
    }
    if targets.is_empty() {
        return Err(Error::invalid(
            "at least one target must be defined in 'targets'",
        ));
    }

    let rules = RulesConfig {
        exclude_sections: raw.rules.unwrap_or_default().exclude_sections,
    };

    let raw_sync = raw.sync.unwrap_or_default();
    let defaults = SyncSettings::default();
    let sync = SyncSettings {
        backup: raw_sync.backup.unwrap_or(defaults.backup),
        backup_dir: raw_sync.backup_dir.unwrap_or(defaults.backup_dir),
        log_dir: raw_sync.log_dir.unwrap_or(defaults.log_dir),
    };

    Ok(AgentSyncConfig {
        version,
        source,
        targets,
        rules,
        sync,
        config_dir,
    })
}

fn validate_source(raw: RawSource) -> Result<SourceConfig> {
    if let Some(kind) = raw.kind.as_deref()
        && kind != "claude"
    {
        return Err(Error::invalid(format!(
            "unknown source type '{kind}'. Supported: claude"
        )));
    }

    let defaults = SourceConfig::default();
    Ok(SourceConfig {
        global_config: raw.global_config.unwrap_or(defaults.global_config),
        project_mcp: raw.project_mcp.unwrap_or(defaults.project_mcp),
        rules_file: raw.rules_file.unwrap_or(defaults.rules_file),
    })
}

fn validate_target(name: &str, value: Value) -> Result<TargetConfig> {
    if !value.is_mapping() {
        return Err(Error::invalid(format!(
            "target '{name}' must be a mapping, got {}",
            yaml_kind(&value)
        )));
    }
    let raw: RawTarget = serde_yaml::from_value(value)
        .map_err(|e| Error::invalid(format!("target '{name}': {e}")))?;

    let in_target = |e: Error| match e {
        Error::InvalidConfig { message } => Error::invalid(format!("target '{name}': {message}")),
        other => other,
    };

    let kind = raw
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::invalid(format!("target '{name}' is missing required field 'type'")))?
        .parse::<TargetKind>()
        .map_err(in_target)?;

    let rules_format = match raw.rules_format.as_deref() {
        Some(format) => format.parse::<RulesFormat>().map_err(in_target)?,
        None => Default::default(),
    };

    let protocols = raw
        .protocols
        .iter()
        .map(|p| p.parse::<Protocol>())
        .collect::<Result<Vec<_>>>()
        .map_err(in_target)?;

    Ok(TargetConfig {
        kind,
        mcp_path: raw.mcp_path.filter(|p| !p.is_empty()),
        config_path: raw.config_path.filter(|p| !p.is_empty()),
        rules_path: raw.rules_path.filter(|p| !p.is_empty()),
        rules_format,
        exclude_servers: raw.exclude_servers,
        protocols,
    })
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
