//! Codex `[mcp_servers.<name>]` tables inside the managed block

use std::collections::HashMap;
use std::sync::LazyLock;

use agentsync_blocks::{TOML_MARKERS, wrap_managed_block};
use agentsync_meta::{ServerDefinition, ServerRegistry};
use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Table name Codex sees for a server identity.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`.
///
/// # Example
/// ```
/// use agentsync_tools::writer::canonical_name;
///
/// assert_eq!(canonical_name("sequential-thinking"), "sequential_thinking");
/// assert_eq!(canonical_name("my.server v2"), "my_server_v2");
/// ```
pub fn canonical_name(identity: &str) -> String {
    identity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Render every server as a table and wrap the result in the sentinel pair.
///
/// Tables are separated by a blank line. Two identities that map to the same
/// table name are an error since Codex would reject the duplicate table.
pub fn render_codex_servers(servers: &ServerRegistry) -> Result<String> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut tables = Vec::with_capacity(servers.len());

    for (identity, def) in servers.iter() {
        let table = canonical_name(identity);
        if let Some(first) = seen.insert(table.clone(), identity) {
            return Err(Error::TableCollision {
                first: first.to_string(),
                second: identity.to_string(),
                table,
            });
        }
        tables.push(server_table(&table, def));
    }

    Ok(wrap_managed_block(&tables.join("\n"), TOML_MARKERS))
}

fn server_table(table: &str, def: &ServerDefinition) -> String {
    let mut out = format!("[mcp_servers.{table}]\n");
    for (key, value) in &def.config {
        match toml_value(value) {
            Some(rendered) => {
                out.push_str(&toml_key(key));
                out.push_str(" = ");
                out.push_str(&rendered);
                out.push('\n');
            }
            None => {
                tracing::warn!(server = %def.name, key = %key, "Value has no TOML form, skipping");
            }
        }
    }
    out
}

fn toml_key(key: &str) -> String {
    if BARE_KEY.is_match(key) {
        key.to_string()
    } else {
        basic_string(key)
    }
}

/// Inline TOML for a JSON value; `None` for values TOML cannot hold (null).
///
/// Everything renders on one line, so no value can open a line that looks
/// like a table header or a sentinel.
fn toml_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(basic_string(s)),
        Value::Array(items) => {
            let items: Option<Vec<String>> = items.iter().map(toml_value).collect();
            Some(format!("[{}]", items?.join(", ")))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .filter_map(|(k, v)| Some(format!("{} = {}", toml_key(k), toml_value(v)?)))
                .collect();
            if pairs.is_empty() {
                Some("{}".to_string())
            } else {
                Some(format!("{{ {} }}", pairs.join(", ")))
            }
        }
    }
}

/// Double-quoted TOML string with every control character escaped.
fn basic_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Server table names declared in the text of a managed block.
///
/// The block is parsed as TOML, so text inside string values never counts.
pub fn extract_table_names(block: &str) -> std::result::Result<Vec<String>, ::toml::de::Error> {
    let table: ::toml::Table = ::toml::from_str(block)?;
    Ok(match table.get("mcp_servers") {
        Some(::toml::Value::Table(servers)) => servers.keys().cloned().collect(),
        _ => Vec::new(),
    })
}
