//! Section model and parser

const MAJOR_MARKER: &str = "## ";
const MINOR_MARKER: &str = "### ";

/// Nesting level of a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionLevel {
    /// `## ` header
    Major,
    /// `### ` header, logically owned by the nearest preceding major section
    Minor,
}

impl SectionLevel {
    /// Classify a line, returning the level and the trimmed header text.
    ///
    /// The minor marker is tested first since `### ` also starts with `##`.
    pub fn classify(line: &str) -> Option<(Self, &str)> {
        if let Some(rest) = line.strip_prefix(MINOR_MARKER) {
            Some((Self::Minor, rest.trim()))
        } else {
            line.strip_prefix(MAJOR_MARKER)
                .map(|rest| (Self::Major, rest.trim()))
        }
    }
}

/// A titled slice of the rules document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header text without the marker, trimmed.
    pub header: String,
    pub level: SectionLevel,
    /// Literal text of the section, header line included.
    pub content: String,
}

/// Parse a Markdown document into its `## ` / `### ` sections.
///
/// Text before the first header is discarded and a document without headers
/// yields no sections. Every other line belongs to the section opened most
/// recently.
///
/// # Example
/// ```
/// use agentsync_content::{parse_sections, SectionLevel};
///
/// let sections = parse_sections("# Title\n## Style\nUse tabs.\n### Go\ngofmt\n");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].header, "Style");
/// assert_eq!(sections[1].level, SectionLevel::Minor);
/// ```
pub fn parse_sections(document: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, SectionLevel, Vec<&str>)> = None;

    for line in document.split('\n') {
        match SectionLevel::classify(line) {
            Some((level, header)) => {
                if let Some(open) = current.take() {
                    sections.push(close(open));
                }
                current = Some((header.to_string(), level, vec![line]));
            }
            None => {
                if let Some((_, _, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some(open) = current {
        sections.push(close(open));
    }

    tracing::debug!(count = sections.len(), "Parsed rules sections");
    sections
}

fn close((header, level, lines): (String, SectionLevel, Vec<&str>)) -> Section {
    Section {
        header,
        level,
        content: lines.join("\n"),
    }
}

/// Header lines that are live in `content`, in document order.
///
/// Only lines that open a section count; a header name mentioned in prose or
/// nested deeper (`#### `) is not live.
pub fn live_headers(content: &str) -> Vec<(SectionLevel, &str)> {
    content
        .split('\n')
        .filter_map(SectionLevel::classify)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preamble_discarded() {
        let sections = parse_sections("intro\n\n## A\nbody\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "## A\nbody\n");
    }

    #[test]
    fn test_no_headers() {
        assert!(parse_sections("just text\n# Title only\n").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn test_header_text_trimmed() {
        let sections = parse_sections("##   Spaced Out   \n");
        assert_eq!(sections[0].header, "Spaced Out");
        assert_eq!(sections[0].level, SectionLevel::Major);
    }

    #[test]
    fn test_deeper_headers_stay_in_body() {
        let sections = parse_sections("### Minor\n#### Detail\ntext");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "### Minor\n#### Detail\ntext");
    }

    #[test]
    fn test_marker_requires_space() {
        assert!(parse_sections("##NoSpace\n###Also\n").is_empty());
    }

    #[test]
    fn test_live_headers() {
        let content = "## Style\nSee ## Secrets for details\n### Go\n#### Deep\n";
        assert_eq!(
            live_headers(content),
            vec![(SectionLevel::Major, "Style"), (SectionLevel::Minor, "Go")]
        );
    }
}
