//! Tier merge into a single server registry

use agentsync_meta::{ServerDefinition, ServerRegistry};

use crate::log::SyncLog;

/// Servers contributed by one source, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerTier {
    /// Human label used in log messages.
    pub label: String,
    pub servers: Vec<ServerDefinition>,
}

impl ServerTier {
    pub fn new(label: impl Into<String>, servers: Vec<ServerDefinition>) -> Self {
        Self {
            label: label.into(),
            servers,
        }
    }

    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

/// Merge tiers given in ascending priority.
///
/// A later definition replaces an earlier one with the same case-insensitive
/// identity wholesale. Identities keep the position where they first
/// appeared. Casing changes and ambiguous transports are logged as warnings.
pub fn merge_tiers(tiers: Vec<ServerTier>, log: &mut SyncLog) -> ServerRegistry {
    let mut registry = ServerRegistry::new();

    for tier in tiers {
        let count = tier.servers.len();
        for def in tier.servers {
            if def.is_ambiguous() {
                log.warn(format!(
                    "Server '{}' in {} has both 'command' and 'url', treating as stdio",
                    def.name, tier.label
                ));
            }

            let name = def.name.clone();
            if let Some(previous) = registry.insert(def)
                && previous.name != name
            {
                log.warn(format!(
                    "Dedup: '{}' replaced by '{}' (case-insensitive merge)",
                    previous.name, name
                ));
            }
        }
        tracing::debug!(tier = %tier.label, servers = count, "Merged tier");
    }

    registry
}
