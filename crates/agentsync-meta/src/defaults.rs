//! Default `agentsync.yaml` written by `agentsync init`

use std::path::Path;

use agentsync_fs::{NormalizedPath, io};

use crate::loader::CONFIG_FILENAME;
use crate::{Error, Result};

/// Commented starter configuration.
pub const DEFAULT_CONFIG: &str = r#"# agentsync.yaml: sync MCP server configs and rules across AI coding agents

version: 1

# Source of truth: where MCP servers and rules are read from
source:
  type: claude                    # only "claude" is supported
  global_config: ~/.claude.json   # Claude Code global config
  project_mcp: .mcp.json          # project-level MCP servers
  rules_file: CLAUDE.md           # project rules (Markdown)

# Targets: where synced configs are written
targets:
  cursor:
    type: cursor
    mcp_path: ~/.cursor/mcp.json
    rules_path: .cursor/rules/project.mdc
    rules_format: mdc              # Markdown behind YAML front matter
    exclude_servers: []

  codex:
    type: codex
    config_path: ~/.codex/config.toml
    rules_path: AGENTS.md
    rules_format: md
    exclude_servers:
      - codex                      # Codex can't call itself

  antigravity:
    type: antigravity
    mcp_path: ~/.gemini/antigravity/mcp_config.json
    protocols:
      - stdio                      # stdio servers only
    exclude_servers: []

# Rules filtering: section headers (## or ###) kept out of generated rules
rules:
  exclude_sections:
    - "MCP Servers"
    - "Context Management & Agents"

sync:
  backup: true                     # back up files before overwriting
  backup_dir: .agentsync/backups
  log_dir: .agentsync/logs
"#;

/// Write [`DEFAULT_CONFIG`] into `dir`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn generate_default_config(dir: &Path, force: bool) -> Result<NormalizedPath> {
    let target = NormalizedPath::new(dir.join(CONFIG_FILENAME));
    if target.exists() && !force {
        return Err(Error::AlreadyExists {
            path: target.to_native(),
        });
    }

    io::write_text(&target, DEFAULT_CONFIG)?;
    tracing::info!(path = %target, "Wrote default config");
    Ok(target)
}
