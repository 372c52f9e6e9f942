//! The external ASR engine seam.
//!
//! Podscribe does no speech recognition itself: recognition and diarization
//! are blocking calls into an external engine reached through the traits
//! below. The pipeline only depends on the traits, so tests drive it with
//! scripted fakes and deployments wire in whatever engine they run.
//!
//! [`CommandEngine`] is the stock integration: it shells out to a
//! FunASR-style command that prints its result as JSON on stdout.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::device::Device;
use crate::dialogue::SpeakerSegment;

/// The raw, engine-shaped result of one recognition call.
///
/// `timestamp_track` is kept as raw JSON values on purpose: engines disagree
/// about record shapes, and classification happens downstream in
/// [`crate::timestamp`]. An empty `text` marks a failed recognition and is
/// rejected by the orchestrator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTranscriptionResult {
    #[serde(default)]
    pub text: String,

    #[serde(default, rename = "timestamp")]
    pub timestamp_track: Vec<Value>,

    #[serde(default)]
    pub speaker_segments: Vec<SpeakerSegment>,
}

/// A loaded recognition model.
pub trait AsrModel {
    /// Recognize one audio file.
    ///
    /// `batch_size_seconds` bounds the audio the engine decodes per inference
    /// batch; `hotwords` is a space-separated bias list and may be empty.
    fn generate(
        &mut self,
        audio: &Path,
        batch_size_seconds: u32,
        hotwords: &str,
    ) -> Result<RawTranscriptionResult>;
}

/// A loaded diarization model.
pub trait DiarizationModel: std::fmt::Debug {
    /// Attribute spans of one audio file to speakers.
    fn generate(&mut self, audio: &Path) -> Result<Vec<SpeakerSegment>>;
}

/// Factory for engine model handles.
///
/// `load_model` failures are transient from the pipeline's point of view and
/// retried under the orchestrator's retry policy. `load_diarization_model` is
/// an optional capability: a failure disables diarization for the run instead
/// of failing it.
pub trait AsrEngine {
    fn load_model(&self, device: Device) -> Result<Box<dyn AsrModel>>;

    fn load_diarization_model(&self, device: Device) -> Result<Box<dyn DiarizationModel>>;
}

/// An engine that invokes external recognizer commands.
///
/// The recognizer command is expected to accept
/// `--audio <path> --device <hint> --batch-size <seconds> [--hotword <words>]`
/// and print a JSON object `{"text": ..., "timestamp": [...]}` on stdout.
/// The diarization command accepts `--audio <path> --device <hint>` and prints
/// a JSON array of speaker segments.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    asr_command: String,
    diarization_command: Option<String>,
}

impl CommandEngine {
    pub fn new(asr_command: impl Into<String>) -> Self {
        Self {
            asr_command: asr_command.into(),
            diarization_command: None,
        }
    }

    pub fn with_diarization_command(mut self, command: impl Into<String>) -> Self {
        self.diarization_command = Some(command.into());
        self
    }
}

impl AsrEngine for CommandEngine {
    fn load_model(&self, device: Device) -> Result<Box<dyn AsrModel>> {
        Ok(Box::new(CommandModel {
            command: self.asr_command.clone(),
            device,
        }))
    }

    fn load_diarization_model(&self, device: Device) -> Result<Box<dyn DiarizationModel>> {
        let Some(command) = self.diarization_command.clone() else {
            bail!("no diarization command configured");
        };
        Ok(Box::new(CommandDiarization { command, device }))
    }
}

struct CommandModel {
    command: String,
    device: Device,
}

impl AsrModel for CommandModel {
    fn generate(
        &mut self,
        audio: &Path,
        batch_size_seconds: u32,
        hotwords: &str,
    ) -> Result<RawTranscriptionResult> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--audio")
            .arg(audio)
            .arg("--device")
            .arg(self.device.as_str())
            .arg("--batch-size")
            .arg(batch_size_seconds.to_string());
        if !hotwords.is_empty() {
            cmd.arg("--hotword").arg(hotwords);
        }

        let stdout = run_capturing(cmd, &self.command)?;
        serde_json::from_slice(&stdout)
            .with_context(|| format!("'{}' printed invalid result JSON", self.command))
    }
}

#[derive(Debug)]
struct CommandDiarization {
    command: String,
    device: Device,
}

impl DiarizationModel for CommandDiarization {
    fn generate(&mut self, audio: &Path) -> Result<Vec<SpeakerSegment>> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--audio")
            .arg(audio)
            .arg("--device")
            .arg(self.device.as_str());

        let stdout = run_capturing(cmd, &self.command)?;
        serde_json::from_slice(&stdout)
            .with_context(|| format!("'{}' printed invalid segment JSON", self.command))
    }
}

fn run_capturing(mut cmd: Command, label: &str) -> Result<Vec<u8>> {
    debug!(command = label, "invoking external engine command");
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn '{label}'"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("'{label}' exited with {}: {}", output.status, stderr.trim());
    }

    Ok(output.stdout)
}
