//! Rules files: bare Markdown or Cursor's `.mdc`

use agentsync_content::{Section, render_sections};
use agentsync_meta::RulesFormat;

/// Prologue placed before `.mdc` rules so Cursor applies them everywhere.
pub const MDC_FRONT_MATTER: &str =
    "---\ndescription: Project rules synced by agentsync\nglobs:\nalwaysApply: true\n---\n\n";

/// Render sections in the requested layout.
///
/// Returns `None` for an empty section list so no rules file is written.
pub fn render_rules(sections: &[Section], format: RulesFormat) -> Option<String> {
    if sections.is_empty() {
        return None;
    }

    let body = render_sections(sections);
    Some(match format {
        RulesFormat::Md => body,
        RulesFormat::Mdc => format!("{MDC_FRONT_MATTER}{body}"),
    })
}
