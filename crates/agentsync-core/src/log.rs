//! Run log threaded through a sync
//!
//! Every entry is mirrored to `tracing` as it is recorded and kept in memory
//! so the CLI can show it and, after a real run, append it to the day's log
//! file.

use agentsync_fs::{NormalizedPath, io};
use chrono::{Local, NaiveTime};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveTime,
    pub level: LogLevel,
    pub message: String,
    pub dry_run: bool,
    /// Heading that opens a phase of the run.
    pub section: bool,
}

impl LogEntry {
    /// `[HH:MM:SS] [LEVEL] [DRY-RUN] message`
    pub fn line(&self) -> String {
        let prefix = if self.dry_run { "[DRY-RUN] " } else { "" };
        let message = if self.section {
            format!("=== {} ===", self.message)
        } else {
            self.message.clone()
        };
        format!(
            "[{}] [{}] {prefix}{message}",
            self.time.format("%H:%M:%S"),
            self.level.label()
        )
    }
}

/// Recorder passed to every phase of a run.
#[derive(Debug, Default)]
pub struct SyncLog {
    dry_run: bool,
    entries: Vec<LogEntry>,
}

impl SyncLog {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            entries: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(dry_run = self.dry_run, "{message}");
        self.record(LogLevel::Info, message, false);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(dry_run = self.dry_run, "{message}");
        self.record(LogLevel::Warn, message, false);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(dry_run = self.dry_run, "{message}");
        self.record(LogLevel::Error, message, false);
    }

    pub fn section(&mut self, title: impl Into<String>) {
        let title = title.into();
        tracing::info!(dry_run = self.dry_run, "=== {title} ===");
        self.record(LogLevel::Info, title, true);
    }

    fn record(&mut self, level: LogLevel, message: String, section: bool) {
        self.entries.push(LogEntry {
            time: Local::now().time(),
            level,
            message,
            dry_run: self.dry_run,
            section,
        });
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(LogEntry::line).collect()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// Append buffered lines to `sync-YYYY-MM-DD.log` in `log_dir`.
    ///
    /// Returns the log file path, or `None` when nothing was recorded.
    pub fn flush_to_file(&self, log_dir: &NormalizedPath) -> Result<Option<NormalizedPath>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let path = log_dir.join(&format!("sync-{}.log", Local::now().format("%Y-%m-%d")));
        let mut text = self.lines().join("\n");
        text.push('\n');
        io::append_text(&path, &text)?;

        tracing::debug!(path = %path, entries = self.entries.len(), "Flushed sync log");
        Ok(Some(path))
    }
}
