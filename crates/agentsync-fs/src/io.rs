//! Atomic I/O operations with file locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a crash never leaves a half-written
/// target file. Missing parent directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, mapping a missing file to `None`.
///
/// Other failures (permissions, invalid UTF-8) are still errors.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Append text to a file, creating it and its parent directories as needed.
///
/// Used for run logs, where earlier runs of the same day must be kept.
pub fn append_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(&native_path, e))?;
    file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    Ok(())
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
