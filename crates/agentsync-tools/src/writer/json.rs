//! `{"mcpServers": {...}}` files used by Cursor and Antigravity

use agentsync_meta::ServerRegistry;
use serde_json::{Map, Value};

use crate::error::Result;

/// Top-level key holding the server map.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Render the registry as pretty JSON (two-space indent, trailing newline).
///
/// Keys are the registry identities; each value is the server's
/// configuration as loaded, key order included.
pub fn render_mcp_json(servers: &ServerRegistry) -> Result<String> {
    let entries: Map<String, Value> = servers
        .iter()
        .map(|(identity, def)| (identity.to_string(), Value::Object(def.config.clone())))
        .collect();

    let mut root = Map::new();
    root.insert(MCP_SERVERS_KEY.to_string(), Value::Object(entries));

    let mut rendered = serde_json::to_string_pretty(&Value::Object(root))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Server names in a JSON server file, in file order.
///
/// A document without an `mcpServers` object has no servers.
pub fn parse_mcp_json(content: &str) -> serde_json::Result<Vec<String>> {
    let value: Value = serde_json::from_str(content)?;
    Ok(value
        .get(MCP_SERVERS_KEY)
        .and_then(Value::as_object)
        .map(|servers| servers.keys().cloned().collect())
        .unwrap_or_default())
}
