//! Pure content generators, one module per output format
//!
//! Nothing here touches the filesystem. Integrations call these to build
//! artifact content and to read generated files back.

pub mod json;
pub mod markdown;
pub mod toml;

pub use self::json::{MCP_SERVERS_KEY, parse_mcp_json, render_mcp_json};
pub use self::markdown::{MDC_FRONT_MATTER, render_rules};
pub use self::toml::{canonical_name, extract_table_names, render_codex_servers};
