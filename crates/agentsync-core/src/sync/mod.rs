//! Reconciliation of all targets with the Claude sources
//!
//! - **engine**: one pass over the selected targets
//! - **diff**: server added/removed summary logged before a write

mod diff;
mod engine;

pub use diff::ServerDiff;
pub use engine::{SyncEngine, SyncOptions, SyncReport, TargetReport};
