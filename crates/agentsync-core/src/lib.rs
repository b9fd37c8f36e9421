//! Reconciliation engine for agentsync
//!
//! Sits between the building-block crates and the CLI:
//!
//! ```text
//!            agentsync-cli
//!                  |
//!            agentsync-core
//!                  |
//!     +--------+---+----+--------+
//!     |        |        |        |
//!    fs     content    meta    tools
//! ```
//!
//! - [`ClaudeSource`] reads the three server tiers and the rules document
//! - [`merge_tiers`] folds tiers into one case-insensitive registry
//! - [`filter_servers`] narrows it per target
//! - [`SyncEngine`] writes every selected target
//! - [`Validator`] reads targets back and reports [`Finding`]s
//!
//! Every phase records into an explicit [`SyncLog`].

pub mod error;
pub mod filter;
pub mod log;
pub mod merge;
pub mod source;
pub mod status;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};
pub use filter::{filter_servers, select_targets};
pub use log::{LogEntry, LogLevel, SyncLog};
pub use merge::{ServerTier, merge_tiers};
pub use source::ClaudeSource;
pub use status::{SourceStatus, StatusReport, TargetStatus, collect_status};
pub use sync::{ServerDiff, SyncEngine, SyncOptions, SyncReport, TargetReport};
pub use validate::{
    Finding, Severity, ValidationReport, Validator, check_case_insensitive_duplicates,
    check_no_excluded_sections, check_server_consistency,
};
