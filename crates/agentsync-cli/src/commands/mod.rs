//! Command implementations for agentsync-cli

pub mod init;
pub mod status;
pub mod sync;
pub mod validate;

pub use init::run_init;
pub use status::run_status;
pub use sync::{SyncArgs, run_sync};
pub use validate::run_validate;

use std::fmt::Display;
use std::path::Path;

use agentsync_meta::AgentSyncConfig;

use crate::error::Result;

/// Terminal output switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    quiet: bool,
    verbose: bool,
}

impl Ui {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Print to stdout unless `--quiet`.
    pub fn say(&self, message: impl Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Load `agentsync.yaml` from `--config` or by searching upward.
pub fn load_config(explicit: Option<&Path>) -> Result<AgentSyncConfig> {
    Ok(agentsync_meta::load(explicit)?)
}
