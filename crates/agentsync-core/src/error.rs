//! Error types for agentsync-core

/// Result type for agentsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole run
///
/// Per-target failures never surface here; they are folded into that
/// target's report instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown target '{name}'. Configured: {}", available.join(", "))]
    UnknownTarget { name: String, available: Vec<String> },

    #[error("No targets configured")]
    NoTargets,

    #[error("Nothing to sync: --mcp-only and --rules-only exclude each other")]
    NothingToSync,

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] agentsync_fs::Error),

    #[error(transparent)]
    Meta(#[from] agentsync_meta::Error),

    #[error(transparent)]
    Tools(#[from] agentsync_tools::Error),
}
