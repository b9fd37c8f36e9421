//! Configuration and server metadata for agentsync.
//!
//! This crate owns the `agentsync.yaml` schema (discovery, loading and
//! semantic validation), the commented default config written by
//! `agentsync init`, and the server definitions every other crate passes
//! around.

pub mod config;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod server;

pub use config::{
    AgentSyncConfig, Protocol, RulesConfig, RulesFormat, SourceConfig, SyncSettings, TargetConfig,
    TargetKind,
};
pub use defaults::{DEFAULT_CONFIG, generate_default_config};
pub use error::{Error, Result};
pub use loader::{CONFIG_FILENAME, find_config, load, load_config, parse_config};
pub use server::{ServerDefinition, ServerRegistry};
