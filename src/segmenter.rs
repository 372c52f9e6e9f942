//! Paragraph segmentation for long, unbroken ASR transcripts.
//!
//! Recognized podcast text arrives as one flat string with sentence-final
//! punctuation but no paragraph structure. We split it into sentences and
//! regroup them into paragraphs using two length thresholds:
//!
//! - below `min_len`, keep admitting sentences (still building toward a
//!   readable paragraph)
//! - at or above `min_len`, a *long* incoming sentence is taken as a weak
//!   new-topic signal and starts a fresh paragraph
//! - at or above `max_len`, the paragraph is force-closed
//!
//! The new-topic signal is a heuristic (sentence length, not semantics). It
//! reads well on conversational transcripts but makes no correctness claim.

/// Default lower bound before we consider breaking a paragraph.
pub const DEFAULT_MIN_PARAGRAPH_LEN: usize = 100;

/// Default upper bound after which a paragraph is force-closed.
pub const DEFAULT_MAX_PARAGRAPH_LEN: usize = 500;

/// A sentence longer than this, arriving once `min_len` is reached,
/// is treated as the likely start of a new topic.
const TOPIC_SHIFT_LEN: usize = 20;

/// Sentence-final punctuation for the transcripts we process (full-width forms).
const SENTENCE_TERMINATORS: [char; 3] = ['。', '！', '？'];

/// Split `text` into sentences, keeping each terminator attached to the
/// sentence it ends. A trailing fragment with no terminator is kept as its
/// own sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if SENTENCE_TERMINATORS.contains(&ch) {
            sentences.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// Regroup `text` into paragraphs joined by a blank line.
///
/// Lengths are measured in characters, not bytes, since the transcripts are
/// predominantly CJK. Blank sentences are dropped before accounting. A single
/// sentence longer than `max_len` is emitted as its own oversized paragraph;
/// we never split inside a sentence.
pub fn segment_text(text: &str, min_len: usize, max_len: usize) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_len = sentence.chars().count();

        if current.is_empty() {
            current.push_str(sentence);
            current_len = sentence_len;
        } else if current_len + sentence_len <= max_len && current_len < min_len {
            // Still building toward the minimum paragraph size.
            current.push_str(sentence);
            current_len += sentence_len;
        } else if current_len >= min_len && sentence_len > TOPIC_SHIFT_LEN {
            // Likely new topic: close out the paragraph and start over.
            paragraphs.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_len = sentence_len;
        } else {
            // Fallback: admit regardless of the resulting length so short
            // sentences never starve between two full paragraphs.
            current.push_str(sentence);
            current_len += sentence_len;
        }

        if current_len >= max_len {
            paragraphs.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}
