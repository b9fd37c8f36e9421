//! Error types for agentsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a command with exit code 1
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from agentsync-core
    #[error(transparent)]
    Core(#[from] agentsync_core::Error),

    /// Error from agentsync-meta (config loading, init)
    #[error(transparent)]
    Meta(#[from] agentsync_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
