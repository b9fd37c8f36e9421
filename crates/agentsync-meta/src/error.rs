//! Error types for agentsync-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] agentsync_fs::Error),

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("No {filename} found in {start} or any parent. Run 'agentsync init' to create one.")]
    NotDiscovered { filename: &'static str, start: PathBuf },

    #[error("Invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("{path} already exists. Use --force to overwrite.")]
    AlreadyExists { path: PathBuf },
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
