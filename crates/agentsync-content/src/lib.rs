//! Rules document handling for agentsync
//!
//! The rules file is treated as a flat list of `## ` and `### ` sections.
//! Sections can be filtered by header (excluding a `## ` section drops its
//! `### ` children too) and rendered back into a single document. Everything
//! here is pure; no I/O.

pub mod filter;
pub mod render;
pub mod section;

pub use filter::filter_sections;
pub use render::render_sections;
pub use section::{Section, SectionLevel, live_headers, parse_sections};
