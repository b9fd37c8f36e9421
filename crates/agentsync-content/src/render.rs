//! Rendering sections back into a document

use crate::section::Section;

/// Join sections with a single blank line and end with one newline.
///
/// Trailing newlines inside each section are dropped first so the separator
/// stays exactly one blank line. An empty list renders to the empty string.
pub fn render_sections(sections: &[Section]) -> String {
    if sections.is_empty() {
        return String::new();
    }

    let mut rendered = sections
        .iter()
        .map(|s| s.content.trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n\n");
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_sections;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_renders_empty() {
        assert_eq!(render_sections(&[]), "");
    }

    #[test]
    fn test_single_blank_line_between_sections() {
        let sections = parse_sections("## A\none\n\n\n## B\ntwo\n");
        assert_eq!(render_sections(&sections), "## A\none\n\n## B\ntwo\n");
    }

    #[test]
    fn test_render_then_parse_is_stable() {
        let sections = parse_sections("## A\none\n### A1\n\n## B\n");
        let rendered = render_sections(&sections);
        assert_eq!(render_sections(&parse_sections(&rendered)), rendered);
    }
}
