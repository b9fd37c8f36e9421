//! Server diff summary logged before a target's server file is written

/// Names added and removed relative to the file on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub kept: usize,
}

impl ServerDiff {
    /// Compare names case-insensitively, keeping the order of each side.
    pub fn between<E: AsRef<str>, N: AsRef<str>>(existing: &[E], next: &[N]) -> Self {
        let existing_lower: Vec<String> =
            existing.iter().map(|e| e.as_ref().to_lowercase()).collect();
        let next_lower: Vec<String> = next.iter().map(|n| n.as_ref().to_lowercase()).collect();

        let added: Vec<String> = next
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !existing_lower.contains(&n.to_lowercase()))
            .map(str::to_string)
            .collect();
        let removed: Vec<String> = existing
            .iter()
            .map(|e| e.as_ref())
            .filter(|e| !next_lower.contains(&e.to_lowercase()))
            .map(str::to_string)
            .collect();

        Self {
            kept: next.len() - added.len(),
            added,
            removed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// `+2 servers (a, b), -1 servers (c)` or `same 3 servers`.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return format!("same {} servers", self.kept);
        }

        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!(
                "+{} servers ({})",
                self.added.len(),
                self.added.join(", ")
            ));
        }
        if !self.removed.is_empty() {
            parts.push(format!(
                "-{} servers ({})",
                self.removed.len(),
                self.removed.join(", ")
            ));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let diff = ServerDiff::between(&["a", "c"], &["a", "b"]);
        assert_eq!(diff.summary(), "+1 servers (b), -1 servers (c)");
        assert_eq!(diff.kept, 1);
    }

    #[test]
    fn test_same_servers() {
        let diff = ServerDiff::between(&["Notion", "a"], &["a", "notion"]);
        assert!(diff.is_empty());
        assert_eq!(diff.summary(), "same 2 servers");
    }
}
