//! Target integrations for agentsync.
//!
//! Each consumer tool gets a [`TargetIntegration`]: it plans the artifacts a
//! sync produces (a JSON server file, a managed block inside Codex's
//! `config.toml`, a rules file) and reads a target's server file back for
//! validation.
//!
//! Content generation itself lives in [`writer`] as pure functions, one
//! module per format. The [`TargetDispatcher`] builds integrations from the
//! loaded configuration in file order.

pub mod antigravity;
pub mod codex;
pub mod cursor;
pub mod dispatcher;
pub mod error;
pub mod integration;
pub mod writer;

pub use antigravity::AntigravityIntegration;
pub use codex::CodexIntegration;
pub use cursor::CursorIntegration;
pub use dispatcher::TargetDispatcher;
pub use error::{Error, Result};
pub use integration::{Artifact, ArtifactContent, ArtifactKind, ServerFileState, TargetIntegration};
