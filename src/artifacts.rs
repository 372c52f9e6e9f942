//! Artifact assembly and persistence.
//!
//! Assembly is pure: it turns one [`RawTranscriptionResult`] into the string
//! bodies of the output files. Writing is a separate step so the orchestrator
//! can keep all I/O at the edge of the pipeline. Filenames derive from the
//! audio stem, so a rerun over the same input overwrites its own artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::dialogue;
use crate::engine::RawTranscriptionResult;
use crate::opts::Opts;
use crate::segmenter::segment_text;
use crate::timestamp::render_track;

/// Marker component identifying a download-cache directory. Audio that lives
/// in a cache keeps its artifacts alongside it; anything else gets a sibling
/// `transcripts` directory.
const CACHE_DIR_MARKER: &str = ".cache";

/// Directory name used for artifacts next to non-cache audio.
const TRANSCRIPTS_DIR: &str = "transcripts";

/// The assembled string bodies of one pipeline run's outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifacts {
    /// Verbatim recognized text, written to `<stem>.txt`.
    pub transcript: String,

    /// Formatted Markdown document, written to `<stem>_formatted.md`.
    pub formatted: String,

    /// Timestamp track body, written to `<stem>_timestamp.txt` when the
    /// engine produced a track at all.
    pub timestamps: Option<String>,
}

/// The on-disk locations produced by [`OutputArtifacts::write`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPaths {
    pub transcript: PathBuf,
    pub formatted: PathBuf,
    pub timestamps: Option<PathBuf>,
}

/// Build all artifact bodies for one recognition result. Pure.
///
/// `diarization_enabled` reflects the *effective* state after best-effort
/// degradation, and is recorded in the document preamble.
pub fn assemble(
    stem: &str,
    result: &RawTranscriptionResult,
    opts: &Opts,
    diarization_enabled: bool,
) -> OutputArtifacts {
    let mut formatted = String::new();
    formatted.push_str(&format!("# {stem} - 转录文本\n\n"));
    formatted.push_str("<!-- generated by podscribe -->\n");
    formatted.push_str(&format!(
        "<!-- speaker diarization: {} -->\n",
        on_off(diarization_enabled)
    ));
    formatted.push_str(&format!(
        "<!-- smart segmentation: {} -->\n\n",
        on_off(opts.enable_segmentation)
    ));

    let dialogue_text = dialogue::format_dialogue(&result.speaker_segments);
    if !dialogue_text.is_empty() {
        formatted.push_str("## 对话记录\n\n");
        formatted.push_str(&dialogue_text);
        formatted.push_str("\n\n---\n\n");
    }

    if opts.enable_segmentation {
        formatted.push_str("## 完整文本（智能分段）\n\n");
        formatted.push_str(&segment_text(
            &result.text,
            opts.min_paragraph_length,
            opts.max_paragraph_length,
        ));
    } else {
        formatted.push_str("## 完整文本\n\n");
        formatted.push_str(&result.text);
    }
    formatted.push('\n');

    let timestamps = if result.timestamp_track.is_empty() {
        None
    } else {
        Some(render_track(&result.timestamp_track))
    };

    OutputArtifacts {
        transcript: result.text.clone(),
        formatted,
        timestamps,
    }
}

impl OutputArtifacts {
    /// Persist the artifacts under `dir` using `<stem>`-derived filenames.
    ///
    /// Reruns overwrite: the same audio identity always maps to the same
    /// paths, which keeps the pipeline idempotent per input.
    pub fn write(&self, dir: &Path, stem: &str) -> Result<WrittenPaths> {
        fs::create_dir_all(dir)?;

        let transcript = dir.join(format!("{stem}.txt"));
        fs::write(&transcript, &self.transcript)?;

        let formatted = dir.join(format!("{stem}_formatted.md"));
        fs::write(&formatted, &self.formatted)?;

        let timestamps = match &self.timestamps {
            Some(body) => {
                let path = dir.join(format!("{stem}_timestamp.txt"));
                fs::write(&path, body)?;
                Some(path)
            }
            None => None,
        };

        Ok(WrittenPaths {
            transcript,
            formatted,
            timestamps,
        })
    }
}

/// Resolve where artifacts for `audio` belong.
///
/// An explicit override always wins. Otherwise audio inside a cache directory
/// keeps its artifacts next to itself, and everything else writes to a sibling
/// `transcripts` directory.
pub fn output_dir_for(audio: &Path, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    let parent = audio.parent().unwrap_or_else(|| Path::new("."));
    if audio.to_string_lossy().contains(CACHE_DIR_MARKER) {
        parent.to_path_buf()
    } else {
        parent.join(TRANSCRIPTS_DIR)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::SpeakerSegment;
    use serde_json::json;

    fn result_with(text: &str) -> RawTranscriptionResult {
        RawTranscriptionResult {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn assemble_without_speakers_or_track_has_body_only() {
        let result = result_with("今天天气很好。");
        let artifacts = assemble("ep1", &result, &Opts::default(), false);

        assert_eq!(artifacts.transcript, "今天天气很好。");
        assert!(artifacts.formatted.starts_with("# ep1 - 转录文本\n\n"));
        assert!(artifacts.formatted.contains("<!-- speaker diarization: disabled -->"));
        assert!(artifacts.formatted.contains("## 完整文本（智能分段）"));
        assert!(!artifacts.formatted.contains("## 对话记录"));
        assert!(artifacts.timestamps.is_none());
    }

    #[test]
    fn assemble_with_speakers_puts_dialogue_before_body() {
        let mut result = result_with("大家好。");
        result.speaker_segments = vec![
            SpeakerSegment::new("主持人", "大家好。"),
            SpeakerSegment::new("嘉宾", "你好。"),
        ];

        let artifacts = assemble("ep2", &result, &Opts::default(), true);
        let dialogue_at = artifacts
            .formatted
            .find("## 对话记录")
            .expect("dialogue section present");
        let body_at = artifacts
            .formatted
            .find("## 完整文本")
            .expect("body section present");
        assert!(dialogue_at < body_at);
        assert!(artifacts.formatted.contains("\n**主持人**:\n大家好。"));
        assert!(artifacts.formatted.contains("\n\n---\n\n"));
    }

    #[test]
    fn assemble_without_segmentation_keeps_text_verbatim() {
        let text = "第一句。第二句。".repeat(100);
        let result = result_with(&text);
        let opts = Opts {
            enable_segmentation: false,
            ..Opts::default()
        };

        let artifacts = assemble("ep3", &result, &opts, false);
        assert!(artifacts.formatted.contains("## 完整文本\n\n"));
        assert!(!artifacts.formatted.contains("智能分段"));
        assert!(artifacts.formatted.contains(&text));
    }

    #[test]
    fn assemble_renders_timestamp_track_when_present() {
        let mut result = result_with("hello");
        result.timestamp_track = vec![json!([0, 100, "he"]), json!([100])];

        let artifacts = assemble("ep4", &result, &Opts::default(), false);
        let body = artifacts.timestamps.expect("track present");
        assert_eq!(body, "[00:00:00.000 -> 00:00:00.100] he\n");
    }

    #[test]
    fn write_creates_stem_named_files_and_overwrites_on_rerun() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let artifacts = OutputArtifacts {
            transcript: "v1".to_string(),
            formatted: "# v1\n".to_string(),
            timestamps: Some("[00:00:00.000 -> 00:00:00.100]\n".to_string()),
        };

        let paths = artifacts.write(dir.path(), "episode")?;
        assert_eq!(paths.transcript, dir.path().join("episode.txt"));
        assert_eq!(paths.formatted, dir.path().join("episode_formatted.md"));
        assert_eq!(
            paths.timestamps.as_deref(),
            Some(dir.path().join("episode_timestamp.txt").as_path())
        );

        let rerun = OutputArtifacts {
            transcript: "v2".to_string(),
            formatted: "# v2\n".to_string(),
            timestamps: None,
        };
        rerun.write(dir.path(), "episode")?;
        assert_eq!(fs::read_to_string(dir.path().join("episode.txt"))?, "v2");
        Ok(())
    }

    #[test]
    fn output_dir_prefers_explicit_override() {
        let audio = Path::new("/data/shows/ep.mp3");
        let dir = output_dir_for(audio, Some(Path::new("/out")));
        assert_eq!(dir, PathBuf::from("/out"));
    }

    #[test]
    fn cache_resident_audio_keeps_artifacts_alongside() {
        let audio = Path::new("/home/me/.cache/podcasts/ep.mp3");
        assert_eq!(
            output_dir_for(audio, None),
            PathBuf::from("/home/me/.cache/podcasts")
        );
    }

    #[test]
    fn other_audio_gets_a_sibling_transcripts_dir() {
        let audio = Path::new("/data/shows/ep.mp3");
        assert_eq!(
            output_dir_for(audio, None),
            PathBuf::from("/data/shows/transcripts")
        );
    }
}
