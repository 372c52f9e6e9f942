use std::path::PathBuf;
use std::time::Duration;

use crate::segmenter::{DEFAULT_MAX_PARAGRAPH_LEN, DEFAULT_MIN_PARAGRAPH_LEN};

/// Options that control how a pipeline run behaves.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (batch jobs, tests) can construct options programmatically
///
/// Every knob lives here rather than in module-level defaults, so two
/// orchestrators in one process can run with different settings.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Total model-load attempts before the run fails.
    pub max_load_retries: u32,

    /// Fixed pause between model-load attempts.
    pub load_backoff: Duration,

    /// Total transcription attempts per audio input before the run fails.
    pub max_transcribe_retries: u32,

    /// Fixed pause between transcription attempts.
    pub transcribe_backoff: Duration,

    /// Lower bound before the segmenter considers breaking a paragraph.
    pub min_paragraph_length: usize,

    /// Upper bound after which a paragraph is force-closed.
    pub max_paragraph_length: usize,

    /// Seconds of audio the engine decodes per inference batch.
    pub batch_size_seconds: u32,

    /// Space-separated recognition bias words. Empty disables biasing.
    pub hotwords: String,

    /// Whether to attempt speaker diarization. Best-effort: a failing
    /// diarization model downgrades the run instead of failing it.
    pub enable_diarization: bool,

    /// Whether the formatted document gets the paragraph-segmented body.
    /// When disabled the recognized text is emitted as-is.
    pub enable_segmentation: bool,

    /// Explicit artifact directory. `None` derives one from the audio path.
    pub output_dir: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            max_load_retries: 3,
            load_backoff: Duration::from_secs(2),
            max_transcribe_retries: 2,
            transcribe_backoff: Duration::from_secs(3),
            min_paragraph_length: DEFAULT_MIN_PARAGRAPH_LEN,
            max_paragraph_length: DEFAULT_MAX_PARAGRAPH_LEN,
            batch_size_seconds: 300,
            hotwords: String::new(),
            enable_diarization: true,
            enable_segmentation: true,
            output_dir: None,
        }
    }
}
