//! Write-or-simulate entry point for generated artifacts
//!
//! Real runs and dry runs share this single code path: the outcome of a
//! simulated write is computed exactly like a real one, the disk is simply
//! left alone.

use crate::{NormalizedPath, Result, backup, io};

/// Whether writes touch the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write files (with optional backups).
    #[default]
    Apply,
    /// Compute outcomes only.
    Simulate,
}

/// What a write did, or would do in simulate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    Unchanged,
}

impl std::fmt::Display for WriteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

/// Result of writing a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: NormalizedPath,
    pub action: WriteAction,
    /// True only when bytes actually hit the disk.
    pub written: bool,
    /// Size of the new content in bytes.
    pub bytes: usize,
    /// Backup taken before overwriting, if any.
    pub backup: Option<NormalizedPath>,
}

impl WriteOutcome {
    /// Whether the file content differs (or would differ) from what was on disk.
    pub fn changed(&self) -> bool {
        self.action != WriteAction::Unchanged
    }
}

/// File-write collaborator used for every generated artifact.
#[derive(Debug, Clone, Default)]
pub struct FileWriter {
    mode: WriteMode,
    backup_dir: Option<NormalizedPath>,
}

impl FileWriter {
    pub fn new(mode: WriteMode) -> Self {
        Self {
            mode,
            backup_dir: None,
        }
    }

    /// Back up existing files into `dir` before overwriting them.
    pub fn with_backup_dir(mut self, dir: NormalizedPath) -> Self {
        self.backup_dir = Some(dir);
        self
    }

    pub fn is_simulation(&self) -> bool {
        self.mode == WriteMode::Simulate
    }

    /// Write `content` to `path`, or report what writing it would do.
    ///
    /// Identical content is never rewritten, so repeated runs do not pile up
    /// backups.
    pub fn write_or_simulate(&self, path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
        let existing = io::read_text_if_exists(path)?;
        let action = match existing.as_deref() {
            None => WriteAction::Create,
            Some(current) if current == content => WriteAction::Unchanged,
            Some(_) => WriteAction::Update,
        };

        let mut outcome = WriteOutcome {
            path: path.clone(),
            action,
            written: false,
            bytes: content.len(),
            backup: None,
        };

        if self.is_simulation() {
            tracing::info!(path = %path, action = %action, bytes = outcome.bytes, "[dry-run] Would write");
            return Ok(outcome);
        }

        if action == WriteAction::Unchanged {
            tracing::debug!(path = %path, "Content unchanged, skipping write");
            return Ok(outcome);
        }

        if let Some(dir) = &self.backup_dir {
            outcome.backup = backup::backup_file(path, dir)?;
        }

        io::write_text(path, content)?;
        outcome.written = true;
        tracing::info!(path = %path, bytes = outcome.bytes, "Wrote file");

        Ok(outcome)
    }
}
