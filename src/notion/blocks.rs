//! Markdown → Notion block mapping.
//!
//! Only the structures our formatted documents actually use are mapped:
//! `#`/`##`/`###` headings and plain paragraphs. Notion caps a single rich
//! text element at 2000 characters, so oversized paragraphs are split into
//! 1900-character chunks (counted in characters, never splitting a code
//! point) to leave headroom.

use serde_json::{Map, Value, json};

/// Notion's per-block rich text ceiling.
pub const MAX_BLOCK_CHARS: usize = 2000;

/// Chunk size used when splitting an oversized paragraph.
pub const SPLIT_CHUNK_CHARS: usize = 1900;

/// One mapped document block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Heading3(String),
    Paragraph(String),
}

impl Block {
    /// The Notion block type tag for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::Paragraph(_) => "paragraph",
        }
    }

    /// The block's text content.
    pub fn text(&self) -> &str {
        match self {
            Self::Heading1(text)
            | Self::Heading2(text)
            | Self::Heading3(text)
            | Self::Paragraph(text) => text,
        }
    }

    /// Render this block as a Notion API block record.
    pub fn to_json(&self) -> Value {
        let rich_text = json!({
            "rich_text": [{"type": "text", "text": {"content": self.text()}}]
        });

        let mut record = Map::new();
        record.insert("object".to_string(), json!("block"));
        record.insert("type".to_string(), json!(self.kind()));
        record.insert(self.kind().to_string(), rich_text);
        Value::Object(record)
    }
}

/// Map Markdown `content` to a flat block sequence.
///
/// Paragraphs are blank-line separated. Front matter and horizontal rules
/// (anything starting with `---`) are skipped; they are metadata and
/// decoration, not content.
pub fn markdown_to_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    for paragraph in content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() || paragraph.starts_with("---") {
            continue;
        }

        if let Some(rest) = paragraph.strip_prefix("# ") {
            blocks.push(Block::Heading1(rest.to_string()));
        } else if let Some(rest) = paragraph.strip_prefix("## ") {
            blocks.push(Block::Heading2(rest.to_string()));
        } else if let Some(rest) = paragraph.strip_prefix("### ") {
            blocks.push(Block::Heading3(rest.to_string()));
        } else {
            push_paragraph(&mut blocks, paragraph);
        }
    }

    blocks
}

fn push_paragraph(blocks: &mut Vec<Block>, paragraph: &str) {
    let chars: Vec<char> = paragraph.chars().collect();
    if chars.len() <= MAX_BLOCK_CHARS {
        blocks.push(Block::Paragraph(paragraph.to_string()));
        return;
    }

    for chunk in chars.chunks(SPLIT_CHUNK_CHARS) {
        blocks.push(Block::Paragraph(chunk.iter().collect()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_headings_by_depth() {
        let blocks = markdown_to_blocks("# 标题\n\n## 对话记录\n\n### 细节\n\n正文段落。");
        assert_eq!(
            blocks,
            vec![
                Block::Heading1("标题".to_string()),
                Block::Heading2("对话记录".to_string()),
                Block::Heading3("细节".to_string()),
                Block::Paragraph("正文段落。".to_string()),
            ]
        );
    }

    #[test]
    fn skips_front_matter_and_rules() {
        let doc = "---\ntitle: x\n---\n\n段落一。\n\n---\n\n段落二。";
        let blocks = markdown_to_blocks(doc);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("段落一。".to_string()),
                Block::Paragraph("段落二。".to_string()),
            ]
        );
    }

    #[test]
    fn paragraph_at_limit_stays_whole() {
        let text = "a".repeat(MAX_BLOCK_CHARS);
        let blocks = markdown_to_blocks(&text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text().chars().count(), MAX_BLOCK_CHARS);
    }

    #[test]
    fn oversized_paragraph_splits_into_chunks() {
        let text = "字".repeat(4000);
        let blocks = markdown_to_blocks(&text);

        assert_eq!(blocks.len(), 3); // 1900 + 1900 + 200
        for block in &blocks {
            assert!(block.text().chars().count() <= SPLIT_CHUNK_CHARS);
        }
        let rejoined: String = blocks.iter().map(Block::text).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn splitting_counts_characters_not_bytes() {
        // 2100 CJK characters are 6300 bytes; byte-based splitting would
        // produce different chunk counts (or torn code points).
        let text = "好".repeat(2100);
        let blocks = markdown_to_blocks(&text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text().chars().count(), SPLIT_CHUNK_CHARS);
        assert_eq!(blocks[1].text().chars().count(), 200);
    }

    #[test]
    fn block_json_uses_type_keyed_payload() {
        let block = Block::Heading2("对话记录".to_string());
        let value = block.to_json();
        assert_eq!(value["object"], "block");
        assert_eq!(value["type"], "heading_2");
        assert_eq!(
            value["heading_2"]["rich_text"][0]["text"]["content"],
            "对话记录"
        );
    }
}
