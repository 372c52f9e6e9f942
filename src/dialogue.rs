//! Speaker-attributed dialogue formatting.
//!
//! Diarization yields a sequence of speaker-labeled segments that is much
//! finer-grained than a readable transcript: one speaker's turn often spans
//! dozens of consecutive segments. We run-length merge consecutive segments
//! with the same label into a single attributed block.
//!
//! Invariant: concatenating the text of all emitted blocks, ignoring speaker
//! boundaries, reproduces the concatenation of all retained segment texts.

use serde::{Deserialize, Serialize};

/// Label used when the diarization output carries no speaker for a segment.
pub const UNKNOWN_SPEAKER: &str = "unknown speaker";

/// One diarized span of the recording.
///
/// Mirrors the wire shape diarization engines emit: `speaker` may be absent
/// (defaulted to [`UNKNOWN_SPEAKER`]), `text` may be blank and is then dropped
/// during formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    #[serde(default = "unknown_speaker")]
    pub speaker: String,

    #[serde(default, rename = "start")]
    pub start_ms: u64,

    #[serde(default, rename = "end")]
    pub end_ms: u64,

    #[serde(default)]
    pub text: String,
}

impl SpeakerSegment {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            start_ms: 0,
            end_ms: 0,
            text: text.into(),
        }
    }
}

fn unknown_speaker() -> String {
    UNKNOWN_SPEAKER.to_string()
}

/// Merge consecutive same-speaker segments into attributed dialogue blocks.
///
/// Each block renders as `"\n**<speaker>**:\n<text>"`; blocks are joined by a
/// single newline. Segments whose text is blank after trimming are skipped
/// entirely: they neither flush the current block nor count as a speaker
/// change. Non-blank text is accumulated verbatim, so the engine's own
/// inter-segment spacing survives the merge.
pub fn format_dialogue(segments: &[SpeakerSegment]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current_speaker: Option<&str> = None;
    let mut current_text = String::new();

    for segment in segments {
        if segment.text.trim().is_empty() {
            continue;
        }

        match current_speaker {
            Some(speaker) if speaker == segment.speaker => {
                current_text.push_str(&segment.text);
            }
            _ => {
                if let Some(speaker) = current_speaker {
                    blocks.push(render_block(speaker, &current_text));
                }
                current_speaker = Some(&segment.speaker);
                current_text.clear();
                current_text.push_str(&segment.text);
            }
        }
    }

    if let Some(speaker) = current_speaker {
        blocks.push(render_block(speaker, &current_text));
    }

    blocks.join("\n")
}

fn render_block(speaker: &str, text: &str) -> String {
    format!("\n**{speaker}**:\n{text}")
}

/// Count the distinct speaker labels across all non-blank segments.
pub fn distinct_speakers(segments: &[SpeakerSegment]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for segment in segments {
        if segment.text.trim().is_empty() {
            continue;
        }
        if !seen.contains(&segment.speaker.as_str()) {
            seen.push(&segment.speaker);
        }
    }
    seen.len()
}
