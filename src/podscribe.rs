//! High-level API for running the transcript pipeline.
//!
//! We expose a single, ergonomic entry point (`Podscribe`) that wires the
//! external ASR engine to the pure formatting stages (timestamp rendering,
//! paragraph segmentation, dialogue formatting) and the artifact writer.
//!
//! The intent is:
//! - We select a device and load the recognition model once (expensive,
//!   retried under a bounded policy).
//! - We probe the diarization model once; absence degrades, never aborts.
//! - We reuse both handles to process multiple audio inputs.
//! - Callers choose thresholds and retry bounds via `Opts`.
//!
//! Each run is single-threaded and blocking: the orchestrator suspends for
//! the duration of every engine call and every backoff sleep. All failure
//! handling concentrates here; the formatting stages are pure functions.

use std::path::Path;

use tracing::{info, warn};

use crate::artifacts::{WrittenPaths, assemble, output_dir_for};
use crate::device::{self, CpuOnlyProbe, Device, DeviceProbe};
use crate::dialogue::distinct_speakers;
use crate::engine::{AsrEngine, AsrModel, DiarizationModel};
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::retry::{RetryPolicy, Sleeper, ThreadSleeper};

/// The main high-level pipeline entry point.
///
/// `Podscribe` owns the long-lived resources of a run:
/// - the loaded recognition model handle
/// - the optional diarization model handle (absent after a failed probe)
/// - the configuration and the sleep abstraction used between retries
///
/// Typical usage:
/// - Construct once (device selection and model loading happen here).
/// - Call `transcribe` for each audio input.
pub struct Podscribe<E: AsrEngine> {
    engine: E,
    model: Box<dyn AsrModel>,
    diarization: Option<Box<dyn DiarizationModel>>,
    device: Device,
    opts: Opts,
    sleeper: Box<dyn Sleeper>,
}

/// Summary of one successful pipeline run, for callers that report progress.
#[derive(Debug)]
pub struct Outcome {
    /// Where the artifacts were written.
    pub paths: WrittenPaths,

    /// Character count of the recognized text.
    pub char_count: usize,

    /// Whether speaker attribution made it into the formatted document.
    pub diarized: bool,

    /// Number of distinct speakers attributed (0 when not diarized).
    pub speaker_count: usize,

    /// The recognized text, kept for previews.
    pub transcript: String,
}

impl<E: AsrEngine> Podscribe<E> {
    /// Create a pipeline with the stock device probe and real sleeping.
    pub fn new(engine: E, opts: Opts) -> Result<Self> {
        Self::with_parts(engine, opts, &CpuOnlyProbe, Box::new(ThreadSleeper))
    }

    /// Create a pipeline with an injected device probe and sleeper.
    ///
    /// Device selection never fails. Model loading is attempted up to
    /// `opts.max_load_retries` times with a fixed backoff; exhausting the
    /// bound is fatal for the whole run. The diarization probe is
    /// best-effort: a failure logs a warning and disables diarization.
    pub fn with_parts(
        engine: E,
        opts: Opts,
        probe: &dyn DeviceProbe,
        mut sleeper: Box<dyn Sleeper>,
    ) -> Result<Self> {
        let device = device::select(probe);
        info!(device = %device, "selected inference device");

        let load_policy = RetryPolicy::new(opts.max_load_retries, opts.load_backoff);
        let model = load_policy
            .run(sleeper.as_mut(), "model load", |_| engine.load_model(device))
            .map_err(|err| Error::model_load(load_policy.max_attempts.max(1), err))?;
        info!("recognition model loaded");

        let diarization = if opts.enable_diarization {
            match engine.load_diarization_model(device) {
                Ok(handle) => {
                    info!("diarization model loaded");
                    Some(handle)
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        "diarization model unavailable, continuing without speaker attribution"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            engine,
            model,
            diarization,
            device,
            opts,
            sleeper,
        })
    }

    /// The device selected at construction.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Whether the diarization capability survived the startup probe.
    pub fn diarization_available(&self) -> bool {
        self.diarization.is_some()
    }

    /// The active configuration.
    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// Access the configured engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run the full pipeline for one audio input.
    ///
    /// Recognition is retried up to `opts.max_transcribe_retries` times; an
    /// empty transcript after a successful call is a distinct, non-retried
    /// failure. Diarization failures degrade the run. Artifact paths derive
    /// from the audio stem, so rerunning the same input overwrites in place.
    pub fn transcribe(&mut self, audio: &Path) -> Result<Outcome> {
        if !audio.is_file() {
            return Err(Error::AudioNotFound(audio.to_path_buf()));
        }
        info!(audio = %audio.display(), "starting transcription");

        let policy = RetryPolicy::new(
            self.opts.max_transcribe_retries,
            self.opts.transcribe_backoff,
        );
        let batch_size_seconds = self.opts.batch_size_seconds;
        let hotwords = self.opts.hotwords.clone();

        let model = &mut self.model;
        let mut result = policy
            .run(self.sleeper.as_mut(), "transcription", |_| {
                model.generate(audio, batch_size_seconds, &hotwords)
            })
            .map_err(|err| Error::transcribe(policy.max_attempts.max(1), err))?;

        if result.text.trim().is_empty() {
            return Err(Error::EmptyTranscript);
        }

        // Best-effort speaker attribution. Engine-provided segments win; the
        // separate diarization pass only fills the gap.
        if result.speaker_segments.is_empty() {
            if let Some(diarization) = self.diarization.as_mut() {
                match diarization.generate(audio) {
                    Ok(segments) => {
                        info!(
                            speakers = distinct_speakers(&segments),
                            "diarization completed"
                        );
                        result.speaker_segments = segments;
                    }
                    Err(err) => {
                        warn!(
                            error = %err,
                            "diarization failed, continuing without speaker attribution"
                        );
                    }
                }
            }
        }

        let stem = audio_stem(audio);
        let diarized = !result.speaker_segments.is_empty();
        let artifacts = assemble(&stem, &result, &self.opts, diarized);

        let dir = output_dir_for(audio, self.opts.output_dir.as_deref());
        let paths = artifacts.write(&dir, &stem)?;
        info!(transcript = %paths.transcript.display(), "artifacts written");

        Ok(Outcome {
            paths,
            char_count: result.text.chars().count(),
            diarized,
            speaker_count: distinct_speakers(&result.speaker_segments),
            transcript: result.text,
        })
    }
}

fn audio_stem(audio: &Path) -> String {
    audio
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_stem_strips_extension() {
        assert_eq!(audio_stem(Path::new("/tmp/ep01.mp3")), "ep01");
        assert_eq!(audio_stem(Path::new("episode.final.m4a")), "episode.final");
    }
}
