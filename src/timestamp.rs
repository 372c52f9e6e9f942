//! Rendering of ASR timestamp tracks.
//!
//! ASR engines disagree about the shape of their timestamp output: some emit
//! `[start_ms, end_ms]` pairs, some `[start_ms, end_ms, token]` triples, and a
//! track can mix both (or contain garbage) within a single result. We model
//! every observed shape as a variant of [`TimestampRecord`] up front, so the
//! renderer is a total pattern match instead of ad-hoc shape inspection.
//!
//! One bad record must never take down the whole track; malformed entries are
//! skipped per record.

use serde_json::Value;
use tracing::debug;

/// A single classified entry from a raw timestamp track.
///
/// `Malformed` captures everything that doesn't destructure into a pair or
/// triple: wrong arity, non-array values, non-numeric or negative time fields.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampRecord {
    /// `[start_ms, end_ms]` with no associated token.
    Span { start_ms: u64, end_ms: u64 },

    /// `[start_ms, end_ms, token]`.
    Token {
        start_ms: u64,
        end_ms: u64,
        token: String,
    },

    /// Anything we could not destructure. Rendered as nothing.
    Malformed,
}

impl TimestampRecord {
    /// Classify one raw track entry.
    ///
    /// Numeric tokens are accepted and rendered through their display form
    /// (engines occasionally emit token indices instead of text). Any other
    /// non-string token makes the record malformed.
    pub fn classify(raw: &Value) -> Self {
        let Some(entry) = raw.as_array() else {
            return Self::Malformed;
        };

        match entry.as_slice() {
            [start, end] => match (time_ms(start), time_ms(end)) {
                (Some(start_ms), Some(end_ms)) => Self::Span { start_ms, end_ms },
                _ => Self::Malformed,
            },
            [start, end, token] => {
                let (Some(start_ms), Some(end_ms)) = (time_ms(start), time_ms(end)) else {
                    return Self::Malformed;
                };
                match token_text(token) {
                    Some(token) => Self::Token {
                        start_ms,
                        end_ms,
                        token,
                    },
                    None => Self::Malformed,
                }
            }
            _ => Self::Malformed,
        }
    }

    /// Render this record as one track line, or `None` for malformed records.
    ///
    /// Out-of-order spans (`start_ms > end_ms`) are rendered as given; ordering
    /// is the engine's claim to make, not ours to repair.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Span { start_ms, end_ms } => Some(format!(
                "[{} -> {}]",
                format_clock(*start_ms),
                format_clock(*end_ms)
            )),
            Self::Token {
                start_ms,
                end_ms,
                token,
            } => {
                if token.is_empty() {
                    // A triple with an empty token prints identically to a pair.
                    return Self::Span {
                        start_ms: *start_ms,
                        end_ms: *end_ms,
                    }
                    .render();
                }
                Some(format!(
                    "[{} -> {}] {}",
                    format_clock(*start_ms),
                    format_clock(*end_ms),
                    token
                ))
            }
            Self::Malformed => None,
        }
    }
}

/// Format a millisecond offset as `HH:MM:SS.mmm`.
///
/// Hours are unbounded (integer division, no modulo wraparound), so multi-day
/// recordings format correctly: `format_clock(90 * 3_600_000)` yields `"90:00:00.000"`.
pub fn format_clock(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Render a raw timestamp track, one line per well-formed record, in input order.
///
/// Malformed records contribute no output and never abort the track; each skip
/// is independent of the records around it.
pub fn render_track(track: &[Value]) -> String {
    let mut out = String::new();
    for (index, raw) in track.iter().enumerate() {
        match TimestampRecord::classify(raw).render() {
            Some(line) => {
                out.push_str(&line);
                out.push('\n');
            }
            None => debug!(index, "skipping malformed timestamp record"),
        }
    }
    out
}

fn time_ms(value: &Value) -> Option<u64> {
    if let Some(ms) = value.as_u64() {
        return Some(ms);
    }
    // Some engines emit fractional milliseconds; round rather than reject.
    let ms = value.as_f64()?;
    if ms.is_finite() && ms >= 0.0 {
        Some(ms.round() as u64)
    } else {
        None
    }
}

fn token_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
