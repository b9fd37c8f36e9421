//! Header-based section exclusion

use crate::section::{Section, SectionLevel};

/// Drop sections whose header is listed in `excluded`.
///
/// Excluding a major section also drops every minor section up to the next
/// major one that is kept. A listed minor section goes on its own; its
/// siblings stay. Header comparison is exact and order is preserved.
///
/// # Example
/// ```
/// use agentsync_content::{filter_sections, parse_sections};
///
/// let sections = parse_sections("## Secrets\n### Keys\n## Usage\n");
/// let kept = filter_sections(&sections, &["Secrets"]);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].header, "Usage");
/// ```
pub fn filter_sections<S: AsRef<str>>(sections: &[Section], excluded: &[S]) -> Vec<Section> {
    let is_excluded = |header: &str| excluded.iter().any(|e| e.as_ref() == header);
    let mut skipping_children = false;
    let mut kept = Vec::with_capacity(sections.len());

    for section in sections {
        match section.level {
            SectionLevel::Major => {
                skipping_children = is_excluded(&section.header);
                if skipping_children {
                    tracing::debug!(header = %section.header, "Excluding section and its children");
                    continue;
                }
            }
            SectionLevel::Minor => {
                if skipping_children || is_excluded(&section.header) {
                    continue;
                }
            }
        }
        kept.push(section.clone());
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_sections;

    fn headers(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.header.as_str()).collect()
    }

    #[test]
    fn test_empty_exclusions_keep_everything() {
        let sections = parse_sections("## A\n### B\n## C\n");
        let kept = filter_sections::<&str>(&sections, &[]);
        assert_eq!(kept, sections);
    }

    #[test]
    fn test_minor_exclusion_keeps_siblings() {
        let sections = parse_sections("## A\n### B\n### C\n");
        assert_eq!(headers(&filter_sections(&sections, &["B"])), vec!["A", "C"]);
    }

    #[test]
    fn test_skip_cleared_by_next_major() {
        let sections = parse_sections("## A\n### A1\n## B\n### B1\n");
        assert_eq!(headers(&filter_sections(&sections, &["A"])), vec!["B", "B1"]);
    }

    #[test]
    fn test_consecutive_excluded_majors() {
        let sections = parse_sections("## A\n### A1\n## B\n### B1\n## C\n");
        assert_eq!(headers(&filter_sections(&sections, &["A", "B"])), vec!["C"]);
    }

    #[test]
    fn test_leading_minor_without_parent() {
        let sections = parse_sections("### Orphan\n## A\n");
        assert_eq!(headers(&filter_sections(&sections, &["A"])), vec!["Orphan"]);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let sections = parse_sections("## Secrets\n");
        assert_eq!(filter_sections(&sections, &["secrets"]).len(), 1);
    }
}
