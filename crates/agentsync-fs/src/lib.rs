//! Filesystem layer for agentsync
//!
//! Provides normalized path handling, `~` expansion, atomic I/O, timestamped
//! backups and the write-or-simulate [`FileWriter`] every generated artifact
//! goes through.

pub mod backup;
pub mod error;
pub mod io;
pub mod path;
pub mod writer;

pub use backup::backup_file;
pub use error::{Error, Result};
pub use path::{NormalizedPath, resolve_path};
pub use writer::{FileWriter, WriteAction, WriteMode, WriteOutcome};
