//! Republishing finished Markdown documents into a Notion database.
//!
//! Everything here except [`client`] is pure: front-matter parsing, the
//! Markdown → block mapping, page-property construction, and batch planning
//! all operate on strings and JSON values, so the interesting rules (the
//! 2000-character block ceiling, the 100-block call cap, date normalization)
//! are unit-testable without a network.

pub mod batch;
pub mod blocks;
pub mod front_matter;
pub mod properties;

#[cfg(feature = "bin-notion-sync")]
pub mod client;
