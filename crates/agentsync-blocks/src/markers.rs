//! Sentinel marker pairs

/// A start/end sentinel pair delimiting a managed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

/// Markers for hash-comment formats (TOML).
pub const TOML_MARKERS: Markers = Markers {
    start: "# === AGENTSYNC START ===",
    end: "# === AGENTSYNC END ===",
};
