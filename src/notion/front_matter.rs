//! Key-value front matter parsing.
//!
//! The formatted documents carry a `---`-delimited metadata block of
//! `key: value` lines. We keep the parser permissive: lines without a colon
//! are ignored, values keep everything after the first colon, and the block
//! does not have to start on the very first line.

use std::collections::BTreeMap;

/// Parse the leading front-matter block of `content`.
///
/// Scanning stops at the closing `---`. A document without front matter
/// yields an empty map.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    let mut in_front_matter = false;

    for line in content.lines() {
        if line.trim() == "---" {
            if in_front_matter {
                break;
            }
            in_front_matter = true;
            continue;
        }

        if in_front_matter {
            if let Some((key, value)) = line.split_once(':') {
                metadata.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    metadata
}
