//! `podscribe` — podcast transcript post-processing.
//!
//! This crate turns a raw ASR result for a podcast episode into structured,
//! human-readable documents:
//! - a paragraph-segmented narrative body
//! - a speaker-attributed dialogue transcript
//! - a rendered timestamp track that tolerates malformed ASR records
//!
//! Recognition itself stays outside: the pipeline talks to an external ASR
//! engine through the `engine` traits, retries its blocking calls under
//! bounded policies, and writes per-episode artifacts. The `notion` modules
//! separately republish a finished Markdown document into a Notion database.
//!
//! The library is designed to be used by both CLI tools and batch jobs,
//! with an emphasis on keeping the formatting stages pure and testable.

// High-level API (most consumers should start here).
pub mod opts;
pub mod podscribe;

// Pure formatting stages.
pub mod dialogue;
pub mod segmenter;
pub mod timestamp;

// The external ASR engine seam and the resources around it.
pub mod device;
pub mod engine;
pub mod retry;

// Artifact assembly and persistence.
pub mod artifacts;

// Republishing into Notion.
pub mod notion;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use crate::error::{Error, Result};
pub use crate::podscribe::{Outcome, Podscribe};
