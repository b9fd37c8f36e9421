//! Merging a freshly generated managed block into existing content.

use crate::markers::Markers;
use crate::parser::find_managed_block;

/// Wraps generated text in the sentinel pair.
///
/// The result always ends with a newline, which keeps
/// [`merge_managed_block`] idempotent when user content follows the block.
///
/// # Example
/// ```
/// use agentsync_blocks::{wrap_managed_block, TOML_MARKERS};
///
/// let block = wrap_managed_block("[mcp_servers.a]\ncommand = \"x\"\n", TOML_MARKERS);
/// assert_eq!(
///     block,
///     "# === AGENTSYNC START ===\n[mcp_servers.a]\ncommand = \"x\"\n# === AGENTSYNC END ===\n"
/// );
/// ```
pub fn wrap_managed_block(inner: &str, markers: Markers) -> String {
    let inner = inner.trim_end_matches('\n');
    if inner.is_empty() {
        format!("{}\n{}\n", markers.start, markers.end)
    } else {
        format!("{}\n{}\n{}\n", markers.start, inner, markers.end)
    }
}

/// Merges `block` into `existing`.
///
/// `block` must already carry both sentinels (see [`wrap_managed_block`]).
///
/// - No existing file (or an empty one): the block is the whole content.
/// - Sentinels present: the old block, sentinels included, is replaced. When
///   the new block ends with a newline the newline after the old end sentinel
///   is replaced too, so repeated merges do not accumulate blank lines.
/// - Sentinels absent: the block is appended after a blank line.
///
/// Text outside the sentinels is never modified.
///
/// # Example
/// ```
/// use agentsync_blocks::{merge_managed_block, wrap_managed_block, TOML_MARKERS};
///
/// let block = wrap_managed_block("[mcp_servers.a]", TOML_MARKERS);
/// let once = merge_managed_block(Some("model = \"o3\"\n"), &block, TOML_MARKERS);
/// let twice = merge_managed_block(Some(&once), &block, TOML_MARKERS);
/// assert_eq!(once, twice);
/// assert!(once.starts_with("model = \"o3\"\n\n# === AGENTSYNC START ==="));
/// ```
pub fn merge_managed_block(existing: Option<&str>, block: &str, markers: Markers) -> String {
    debug_assert!(
        find_managed_block(block, markers).is_some(),
        "managed block must carry its sentinels"
    );

    let existing = match existing {
        Some(content) if !content.is_empty() => content,
        _ => return block.to_string(),
    };

    match find_managed_block(existing, markers) {
        Some(found) => {
            let mut end = found.end;
            if block.ends_with('\n') && existing[end..].starts_with('\n') {
                end += 1;
            }
            tracing::debug!(
                start_line = found.start_line,
                end_line = found.end_line,
                "Replacing managed block"
            );
            let mut merged = String::with_capacity(existing.len() + block.len());
            merged.push_str(&existing[..found.start]);
            merged.push_str(block);
            merged.push_str(&existing[end..]);
            merged
        }
        None => {
            tracing::debug!("No managed block found, appending");
            let separator = if existing.ends_with('\n') { "\n" } else { "\n\n" };
            format!("{existing}{separator}{block}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::TOML_MARKERS;

    fn block(inner: &str) -> String {
        wrap_managed_block(inner, TOML_MARKERS)
    }

    #[test]
    fn test_no_file_yields_block() {
        let b = block("[mcp_servers.a]");
        assert_eq!(merge_managed_block(None, &b, TOML_MARKERS), b);
    }

    #[test]
    fn test_empty_file_yields_block() {
        let b = block("[mcp_servers.a]");
        assert_eq!(merge_managed_block(Some(""), &b, TOML_MARKERS), b);
    }

    #[test]
    fn test_append_without_trailing_newline() {
        let b = block("x");
        let merged = merge_managed_block(Some("model = \"o3\""), &b, TOML_MARKERS);
        assert_eq!(merged, format!("model = \"o3\"\n\n{b}"));
    }

    #[test]
    fn test_wrap_empty_inner() {
        assert_eq!(
            block(""),
            "# === AGENTSYNC START ===\n# === AGENTSYNC END ===\n"
        );
    }
}
