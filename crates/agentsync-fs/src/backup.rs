//! Timestamped backups of files about to be overwritten

use crate::{Error, NormalizedPath, Result};
use chrono::Local;
use std::fs;

/// Timestamp format used in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Copy `path` into `backup_dir` as `<file name>.<timestamp>.bak`.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn backup_file(path: &NormalizedPath, backup_dir: &NormalizedPath) -> Result<Option<NormalizedPath>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file_name = path.file_name().ok_or_else(|| Error::BackupName {
        path: path.to_native(),
    })?;

    fs::create_dir_all(backup_dir.to_native()).map_err(|e| Error::io(backup_dir.to_native(), e))?;

    let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
    let backup_path = backup_dir.join(&format!("{file_name}.{timestamp}.bak"));

    fs::copy(path.to_native(), backup_path.to_native())
        .map_err(|e| Error::io(backup_path.to_native(), e))?;

    tracing::info!(source = %path, backup = %backup_path, "Backed up file");
    Ok(Some(backup_path))
}
