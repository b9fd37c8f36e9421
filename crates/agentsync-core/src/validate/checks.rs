//! Individual consistency checks
//!
//! Each check returns a [`Finding`]; a failed check is data, not an error.

use std::collections::HashMap;
use std::fmt;

use agentsync_content::live_headers;
use agentsync_meta::{Protocol, ServerRegistry};

use crate::filter::filter_servers;

/// How much a finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// What was checked, e.g. `cursor: MCP servers`.
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Passing finding that still deserves attention.
    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Compare the servers a target should hold with what its file holds.
///
/// The expected set is `expected` narrowed by `exclusions` and the optional
/// `protocols` allow-list, with each identity mapped through `written_name`
/// to the form the target writes. Names compare case-insensitively. Missing
/// names fail; extra names are only reported.
pub fn check_server_consistency<S, A>(
    name: &str,
    expected: &ServerRegistry,
    actual: &[A],
    exclusions: &[S],
    protocols: Option<&[Protocol]>,
    written_name: impl Fn(&str) -> String,
) -> Finding
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let expected: Vec<String> = filter_servers(expected, exclusions, protocols.unwrap_or(&[]))
        .identities()
        .map(written_name)
        .collect();

    let fold = ServerRegistry::identity;
    let actual_folded: Vec<String> = actual.iter().map(|a| fold(a.as_ref())).collect();
    let expected_folded: Vec<String> = expected.iter().map(|e| fold(e.as_str())).collect();

    let missing: Vec<&str> = expected
        .iter()
        .map(String::as_str)
        .filter(|e| !actual_folded.contains(&fold(e)))
        .collect();
    let extra: Vec<&str> = actual
        .iter()
        .map(AsRef::as_ref)
        .filter(|a| !expected_folded.contains(&fold(a)))
        .collect();

    let extra_note = format!("extra {}: {}", extra.len(), extra.join(", "));

    if missing.is_empty() {
        let mut message = format!(
            "{}/{} expected servers present",
            actual.len(),
            expected.len()
        );
        if !extra.is_empty() {
            message.push_str(&format!(" ({extra_note})"));
        }
        return Finding::pass(name, message);
    }

    let mut message = format!("missing {}: {}", missing.len(), missing.join(", "));
    if !extra.is_empty() {
        message.push_str(&format!("; {extra_note}"));
    }
    Finding::fail(name, message)
}

/// Fail when an excluded header still appears as a live header line.
pub fn check_no_excluded_sections<S: AsRef<str>>(
    name: &str,
    content: &str,
    excluded: &[S],
) -> Finding {
    let leaked: Vec<&str> = live_headers(content)
        .into_iter()
        .map(|(_, header)| header)
        .filter(|header| excluded.iter().any(|e| e.as_ref() == *header))
        .collect();

    if leaked.is_empty() {
        Finding::pass(name, "no excluded sections present")
    } else {
        Finding::fail(
            name,
            format!(
                "contains {} excluded sections: {}",
                leaked.len(),
                leaked.join(", ")
            ),
        )
    }
}

/// Fail when two names fold to the same identity.
pub fn check_case_insensitive_duplicates<S: AsRef<str>>(name: &str, names: &[S]) -> Finding {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut pairs = Vec::new();

    for n in names.iter().map(AsRef::as_ref) {
        let identity = ServerRegistry::identity(n);
        if let Some(first) = seen.get(&identity) {
            pairs.push(format!("'{first}' vs '{n}'"));
        } else {
            seen.insert(identity, n);
        }
    }

    if pairs.is_empty() {
        Finding::pass(name, "no case-insensitive duplicates")
    } else {
        Finding::fail(name, format!("duplicates found: {}", pairs.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentsync_meta::ServerDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    const NO_EXCLUSIONS: &[&str] = &[];

    fn registry(entries: Value) -> ServerRegistry {
        let Value::Object(map) = entries else {
            panic!("registry fixture must be an object");
        };
        map.into_iter()
            .map(|(name, config)| match config {
                Value::Object(config) => ServerDefinition::new(name, config),
                _ => panic!("server config must be an object"),
            })
            .collect()
    }

    fn same(identity: &str) -> String {
        identity.to_string()
    }

    fn stdio(names: &[&str]) -> ServerRegistry {
        registry(Value::Object(
            names
                .iter()
                .map(|n| (n.to_string(), json!({"command": "npx"})))
                .collect(),
        ))
    }

    #[test]
    fn test_missing_server_fails_naming_it() {
        let finding =
            check_server_consistency("cursor", &stdio(&["a", "b"]), &["a"], NO_EXCLUSIONS, None, same);
        assert!(!finding.passed);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.message, "missing 1: b");
    }

    #[test]
    fn test_extra_server_passes() {
        let finding =
            check_server_consistency("cursor", &stdio(&["a"]), &["a", "c"], NO_EXCLUSIONS, None, same);
        assert!(finding.passed);
        assert_eq!(finding.message, "2/1 expected servers present (extra 1: c)");
    }

    #[test]
    fn test_present_count_reflects_target_file() {
        let finding = check_server_consistency(
            "cursor",
            &stdio(&["a", "b"]),
            &["b", "a"],
            NO_EXCLUSIONS,
            None,
            same,
        );
        assert_eq!(finding.message, "2/2 expected servers present");
    }

    #[test]
    fn test_missing_and_extra() {
        let finding =
            check_server_consistency("cursor", &stdio(&["a", "b"]), &["c"], NO_EXCLUSIONS, None, same);
        assert_eq!(finding.message, "missing 2: a, b; extra 1: c");
    }

    #[test]
    fn test_consistency_ignores_case() {
        let finding =
            check_server_consistency("codex", &stdio(&["notion"]), &["Notion"], NO_EXCLUSIONS, None, same);
        assert!(finding.passed);
    }

    #[test]
    fn test_exclusions_narrow_expected_servers() {
        let expected = stdio(&["context7", "codex"]);
        let finding =
            check_server_consistency("codex", &expected, &["context7"], &["CODEX"], None, same);
        assert!(finding.passed);
        assert_eq!(finding.message, "1/1 expected servers present");
    }

    #[test]
    fn test_transport_filter_narrows_expected_servers() {
        let expected = registry(json!({
            "context7": {"command": "npx"},
            "notion": {"url": "https://mcp.notion.com"},
            "hybrid": {"command": "npx", "url": "https://mcp.example.com"},
        }));

        let stdio_only = check_server_consistency(
            "antigravity",
            &expected,
            &["context7", "hybrid"],
            NO_EXCLUSIONS,
            Some(&[Protocol::Stdio]),
            same,
        );
        assert!(stdio_only.passed, "{}", stdio_only.message);

        let http_only = check_server_consistency(
            "remote",
            &expected,
            &["notion"],
            NO_EXCLUSIONS,
            Some(&[Protocol::Http]),
            same,
        );
        assert!(!http_only.passed);
        assert_eq!(http_only.message, "missing 1: hybrid");
    }

    #[test]
    fn test_written_name_mapping() {
        let finding = check_server_consistency(
            "codex",
            &stdio(&["my-server"]),
            &["my_server"],
            NO_EXCLUSIONS,
            None,
            |identity: &str| identity.replace('-', "_"),
        );
        assert!(finding.passed, "{}", finding.message);
    }

    #[test]
    fn test_excluded_section_leak() {
        let content = "## Usage\ntext\n### Keys\n#### Keys\n";
        let finding = check_no_excluded_sections("AGENTS.md", content, &["Keys", "Secrets"]);
        assert!(!finding.passed);
        assert_eq!(finding.message, "contains 1 excluded sections: Keys");

        let clean = check_no_excluded_sections("AGENTS.md", "## Usage\n", &["Keys"]);
        assert!(clean.passed);
    }

    #[test]
    fn test_case_duplicates() {
        let finding = check_case_insensitive_duplicates("source", &["Notion", "github", "notion"]);
        assert!(!finding.passed);
        assert_eq!(finding.message, "duplicates found: 'Notion' vs 'notion'");

        assert!(check_case_insensitive_duplicates("source", &["a", "b"]).passed);
    }
}
