//! Claude-side source of truth
//!
//! Servers come from three tiers, lowest priority first:
//!
//! 1. top-level `mcpServers` in the global `~/.claude.json`
//! 2. `projects[<config dir>].mcpServers` in the same file
//! 3. `mcpServers` in the project-local `.mcp.json`
//!
//! Rules come from `CLAUDE.md`. Any missing or malformed input contributes
//! nothing and is logged; it never fails the run.

use agentsync_content::{Section, parse_sections};
use agentsync_fs::{NormalizedPath, io};
use agentsync_meta::{AgentSyncConfig, ServerDefinition, ServerRegistry};
use serde_json::Value;

use crate::log::SyncLog;
use crate::merge::{ServerTier, merge_tiers};

const MCP_SERVERS_KEY: &str = "mcpServers";

/// Resolved input paths for one config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudeSource {
    pub global_config: NormalizedPath,
    pub project_mcp: NormalizedPath,
    pub rules_file: NormalizedPath,
    /// Key of this project inside the global `projects` map.
    pub project_key: String,
}

impl ClaudeSource {
    pub fn from_config(config: &AgentSyncConfig) -> Self {
        Self {
            global_config: config.resolve(&config.source.global_config),
            project_mcp: config.resolve(&config.source.project_mcp),
            rules_file: config.resolve(&config.source.rules_file),
            project_key: config.config_dir.as_str().to_string(),
        }
    }

    /// The three server tiers in ascending priority.
    pub fn load_tiers(&self, log: &mut SyncLog) -> Vec<ServerTier> {
        let global = read_json(&self.global_config, log);
        let project = read_json(&self.project_mcp, log);

        let global_label = format!("{} (global)", self.global_config);
        let global_project_label = format!("{} (project {})", self.global_config, self.project_key);
        let project_label = self.project_mcp.to_string();

        let global_servers = global.as_ref().and_then(|v| v.get(MCP_SERVERS_KEY));
        let global_project_servers = global
            .as_ref()
            .and_then(|v| v.get("projects"))
            .and_then(|p| p.get(&self.project_key))
            .and_then(|p| p.get(MCP_SERVERS_KEY));
        let project_servers = project.as_ref().and_then(|v| v.get(MCP_SERVERS_KEY));

        vec![
            ServerTier::new(
                global_label.clone(),
                servers_from(global_servers, &global_label, log),
            ),
            ServerTier::new(
                global_project_label.clone(),
                servers_from(global_project_servers, &global_project_label, log),
            ),
            ServerTier::new(
                project_label.clone(),
                servers_from(project_servers, &project_label, log),
            ),
        ]
    }

    /// Merged registry from all tiers.
    pub fn load_servers(&self, log: &mut SyncLog) -> ServerRegistry {
        let tiers = self.load_tiers(log);
        let registry = merge_tiers(tiers, log);
        log.info(format!(
            "Loaded {} MCP servers from Claude sources",
            registry.len()
        ));
        registry
    }

    /// Sections of the rules document; empty when it is missing or blank.
    pub fn load_rules(&self, log: &mut SyncLog) -> Vec<Section> {
        let content = match io::read_text_if_exists(&self.rules_file) {
            Ok(Some(content)) => content,
            Ok(None) => {
                log.warn(format!("Rules file not found: {}", self.rules_file));
                return Vec::new();
            }
            Err(e) => {
                log.warn(format!("Could not read rules file: {e}"));
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            log.warn(format!("Rules file is empty: {}", self.rules_file));
            return Vec::new();
        }

        let sections = parse_sections(&content);
        log.info(format!(
            "Parsed {} sections from {}",
            sections.len(),
            self.rules_file
        ));
        sections
    }
}

fn read_json(path: &NormalizedPath, log: &mut SyncLog) -> Option<Value> {
    let content = match io::read_text_if_exists(path) {
        Ok(Some(content)) => content,
        Ok(None) => {
            log.warn(format!("File not found: {path}"));
            return None;
        }
        Err(e) => {
            log.warn(format!("Could not read {path}: {e}"));
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            log.warn(format!("Expected a JSON object in {path}, ignoring"));
            None
        }
        Err(e) => {
            log.warn(format!("Invalid JSON in {path}: {e}"));
            None
        }
    }
}

fn servers_from(value: Option<&Value>, label: &str, log: &mut SyncLog) -> Vec<ServerDefinition> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Value::Object(entries) = value else {
        log.warn(format!("'{MCP_SERVERS_KEY}' in {label} is not a mapping, ignoring"));
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(name, config)| match config {
            Value::Object(map) => Some(ServerDefinition::new(name, map.clone())),
            _ => {
                log.warn(format!("Server '{name}' in {label} is not a mapping, skipping"));
                None
            }
        })
        .collect()
}
