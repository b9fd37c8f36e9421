//! Normalized path handling and config-relative resolution

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Target paths come from user configuration on any platform, so they are
/// stored with forward slashes and converted to platform-native form only at
/// I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Native form, used at I/O boundaries.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a relative segment; backslashes in it are normalized too.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Parent directory; `None` for a bare file name.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Whether the path is absolute (POSIX root or Windows drive prefix).
    pub fn is_absolute(&self) -> bool {
        let bytes = self.inner.as_bytes();
        self.inner.starts_with('/')
            || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && &bytes[1..3] == b":/")
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Resolve a configured path string.
///
/// A leading `~` expands to the home directory; anything still relative is
/// joined onto `base_dir` (the directory holding `agentsync.yaml`).
pub fn resolve_path(path_str: &str, base_dir: &NormalizedPath) -> NormalizedPath {
    let expanded = expand_home(path_str);
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded.as_str())
    }
}

fn expand_home(path_str: &str) -> NormalizedPath {
    let rest = if path_str == "~" {
        Some("")
    } else {
        path_str
            .strip_prefix("~/")
            .or_else(|| path_str.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => NormalizedPath::new(home),
        (Some(rest), Some(home)) => NormalizedPath::new(home).join(rest),
        _ => NormalizedPath::new(path_str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_normalized() {
        let path = NormalizedPath::new("a\\b\\c.json");
        assert_eq!(path.as_str(), "a/b/c.json");
    }

    #[test]
    fn test_parent_and_file_name() {
        let path = NormalizedPath::new("/home/user/.cursor/mcp.json");
        assert_eq!(path.file_name(), Some("mcp.json"));
        assert_eq!(path.parent().unwrap().as_str(), "/home/user/.cursor");
        assert_eq!(NormalizedPath::new("/mcp.json").parent().unwrap().as_str(), "/");
        assert!(NormalizedPath::new("mcp.json").parent().is_none());
    }

    #[test]
    fn test_is_absolute() {
        assert!(NormalizedPath::new("/etc/x").is_absolute());
        assert!(NormalizedPath::new("C:\\Users\\x").is_absolute());
        assert!(!NormalizedPath::new("AGENTS.md").is_absolute());
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = NormalizedPath::new("/work/project");
        let resolved = resolve_path(".cursor/rules/project.mdc", &base);
        assert_eq!(resolved.as_str(), "/work/project/.cursor/rules/project.mdc");
    }

    #[test]
    fn test_resolve_absolute_untouched() {
        let base = NormalizedPath::new("/work/project");
        let resolved = resolve_path("/etc/codex/config.toml", &base);
        assert_eq!(resolved.as_str(), "/etc/codex/config.toml");
    }

    #[test]
    fn test_resolve_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let base = NormalizedPath::new("/work/project");
        let resolved = resolve_path("~/.claude.json", &base);
        assert_eq!(resolved, NormalizedPath::new(home).join(".claude.json"));
    }
}
