//! Target selection and per-target server filtering

use agentsync_meta::{Protocol, ServerRegistry};
use agentsync_tools::{TargetDispatcher, TargetIntegration};

use crate::error::{Error, Result};

/// Targets a run works on, in configuration order.
///
/// # Errors
///
/// Returns [`Error::NoTargets`] when nothing is configured and
/// [`Error::UnknownTarget`] when `only` names a target that does not exist.
pub fn select_targets<'d>(
    dispatcher: &'d TargetDispatcher,
    only: Option<&str>,
) -> Result<Vec<&'d dyn TargetIntegration>> {
    if dispatcher.is_empty() {
        return Err(Error::NoTargets);
    }

    match only {
        None => Ok(dispatcher.iter().collect()),
        Some(name) => dispatcher
            .get(name)
            .map(|target| vec![target])
            .ok_or_else(|| Error::UnknownTarget {
                name: name.to_string(),
                available: dispatcher.names().map(str::to_string).collect(),
            }),
    }
}

/// Servers a target should receive.
///
/// `exclusions` are folded the same way as registry identities. A non-empty
/// `protocols` list keeps servers reachable over any listed transport; empty
/// inputs leave that axis unfiltered.
pub fn filter_servers<S: AsRef<str>>(
    registry: &ServerRegistry,
    exclusions: &[S],
    protocols: &[Protocol],
) -> ServerRegistry {
    registry.filtered(|identity, def| {
        let excluded = exclusions
            .iter()
            .any(|e| ServerRegistry::identity(e.as_ref()) == identity);
        !excluded && def.allowed_by(protocols)
    })
}
