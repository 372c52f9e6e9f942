use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Podscribe's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Podscribe's crate-wide error type.
///
/// The variants mirror the pipeline's failure taxonomy:
/// - terminal input problems (`AudioNotFound`)
/// - retry bounds exhausted (`ModelLoad`, `Transcribe`)
/// - a successful engine call that produced nothing usable (`EmptyTranscript`)
/// - plain I/O while persisting artifacts (`Io`)
///
/// Diarization failures are deliberately *not* represented here: they degrade
/// the run instead of failing it, so they never cross this boundary.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("audio file not found: {0}")]
    AudioNotFound(PathBuf),

    #[error("model load failed after {attempts} attempt(s)")]
    ModelLoad {
        attempts: u32,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("transcription failed after {attempts} attempt(s)")]
    Transcribe {
        attempts: u32,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("transcription returned an empty transcript")]
    EmptyTranscript,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an engine-side load failure with the attempt bound that was exhausted.
    pub(crate) fn model_load(attempts: u32, source: anyhow::Error) -> Self {
        Self::ModelLoad {
            attempts,
            source: source.into(),
        }
    }

    /// Wrap an engine-side transcription failure with the attempt bound that was exhausted.
    pub(crate) fn transcribe(attempts: u32, source: anyhow::Error) -> Self {
        Self::Transcribe {
            attempts,
            source: source.into(),
        }
    }
}
