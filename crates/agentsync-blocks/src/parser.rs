//! Locating a managed block inside existing content.

use crate::markers::Markers;

/// A managed block found in some content, with byte offsets into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlock {
    /// Byte offset where the start sentinel begins.
    pub start: usize,
    /// Byte offset just past the end sentinel.
    pub end: usize,
    /// Text between the sentinels, without the newline that follows the
    /// start sentinel or the one that precedes the end sentinel.
    pub inner: String,
    /// 1-based line number of the start sentinel.
    pub start_line: usize,
    /// 1-based line number of the end sentinel.
    pub end_line: usize,
}

/// Finds the managed block delimited by `markers`.
///
/// Sentinels only count when they fill a whole line. The block ends at the
/// first end sentinel that follows a start sentinel and begins at the last
/// start sentinel before it, so a stray start sentinel earlier in the file
/// never swallows user content. Returns `None` unless both sentinels are
/// present in that order.
///
/// # Example
/// ```
/// use agentsync_blocks::{find_managed_block, TOML_MARKERS};
///
/// let content = "model = \"o3\"\n# === AGENTSYNC START ===\n[mcp_servers.a]\n# === AGENTSYNC END ===\n";
/// let block = find_managed_block(content, TOML_MARKERS).unwrap();
/// assert_eq!(block.inner, "[mcp_servers.a]");
/// assert_eq!(block.start_line, 2);
/// ```
pub fn find_managed_block(content: &str, markers: Markers) -> Option<ManagedBlock> {
    let first_start = sentinel_lines(content, markers.start).next()?;
    let search_from = first_start + markers.start.len();
    let end_marker_pos =
        sentinel_lines(content, markers.end).find(|&pos| pos >= search_from)?;
    let start = sentinel_lines(&content[..end_marker_pos], markers.start).last()?;
    let end = end_marker_pos + markers.end.len();

    let raw_inner = &content[start + markers.start.len()..end_marker_pos];
    let inner = raw_inner.strip_prefix('\n').unwrap_or(raw_inner);
    let inner = inner.strip_suffix('\n').unwrap_or(inner);

    let start_line = content[..start].matches('\n').count() + 1;
    let end_line = content[..end_marker_pos].matches('\n').count() + 1;

    Some(ManagedBlock {
        start,
        end,
        inner: inner.to_string(),
        start_line,
        end_line,
    })
}

/// Byte offsets of every line that consists of exactly `sentinel`.
fn sentinel_lines<'c>(content: &'c str, sentinel: &'c str) -> impl Iterator<Item = usize> + 'c {
    content.match_indices(sentinel).filter_map(move |(pos, _)| {
        let at_line_start = pos == 0 || content[..pos].ends_with('\n');
        let rest = &content[pos + sentinel.len()..];
        let at_line_end = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");
        (at_line_start && at_line_end).then_some(pos)
    })
}
