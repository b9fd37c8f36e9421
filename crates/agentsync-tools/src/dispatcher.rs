//! Builds one integration per configured target

use agentsync_meta::{AgentSyncConfig, TargetConfig, TargetKind};
use indexmap::IndexMap;

use crate::antigravity::AntigravityIntegration;
use crate::codex::CodexIntegration;
use crate::cursor::CursorIntegration;
use crate::integration::TargetIntegration;

/// Integrations keyed by target name, in configuration order.
pub struct TargetDispatcher {
    integrations: IndexMap<String, Box<dyn TargetIntegration>>,
}

impl TargetDispatcher {
    pub fn from_config(config: &AgentSyncConfig) -> Self {
        let integrations = config
            .targets
            .iter()
            .map(|(name, target)| (name.clone(), Self::create_integration(name, target, config)))
            .collect();
        Self { integrations }
    }

    fn create_integration(
        name: &str,
        target: &TargetConfig,
        config: &AgentSyncConfig,
    ) -> Box<dyn TargetIntegration> {
        match target.kind {
            TargetKind::Cursor => Box::new(CursorIntegration::new(name, target, config)),
            TargetKind::Codex => Box::new(CodexIntegration::new(name, target, config)),
            TargetKind::Antigravity => Box::new(AntigravityIntegration::new(name, target, config)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn TargetIntegration> {
        self.integrations.get(name).map(|i| &**i)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.integrations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.integrations.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TargetIntegration> {
        self.integrations
            .values()
            .map(|i| -> &dyn TargetIntegration { i.as_ref() })
    }

    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }
}
