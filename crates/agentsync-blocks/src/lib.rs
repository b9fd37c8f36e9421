//! Managed block merging for agentsync.
//!
//! A managed block is the region of a target file that agentsync owns and
//! regenerates on every run. It is delimited by a pair of sentinel lines:
//!
//! ```text
//! # === AGENTSYNC START ===
//! [mcp_servers.context7]
//! command = "npx"
//! # === AGENTSYNC END ===
//! ```
//!
//! Everything outside the sentinels belongs to the user and is preserved
//! byte-for-byte. The functions here are pure string operations; reading and
//! writing files is left to `agentsync-fs`.

pub mod markers;
pub mod parser;
pub mod writer;

pub use markers::{Markers, TOML_MARKERS};
pub use parser::{ManagedBlock, find_managed_block};
pub use writer::{merge_managed_block, wrap_managed_block};
