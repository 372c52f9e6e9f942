//! Page-property construction from document front matter.
//!
//! Property names are the target database's column names (a mix of Chinese
//! and English, as the database was created by hand). Dates need
//! normalization: episode pages carry either a script-localized
//! `YYYY年MM月DD日` date or an ISO `published_at` timestamp whose
//! fractional-seconds-and-zone suffix Notion rejects.

use std::collections::BTreeMap;

use serde_json::{Value, json};

/// Build the Notion page properties for a document's metadata.
///
/// `title` falls back to `"Untitled"`; every other property is omitted when
/// its front-matter key is absent.
pub fn page_properties(metadata: &BTreeMap<String, String>) -> Value {
    let title = metadata.get("title").map(String::as_str).unwrap_or("Untitled");
    let mut properties = json!({
        "标题": {"title": [{"text": {"content": title}}]}
    });

    if let Some(podcast_name) = metadata.get("podcast_name") {
        properties["主播"] = json!({"rich_text": [{"text": {"content": podcast_name}}]});
    }

    if let Some(date) = resolve_published_date(metadata) {
        properties["发布日期"] = json!({"date": {"start": date}});
    }

    if let Some(duration) = metadata.get("duration_text") {
        properties["时长"] = json!({"rich_text": [{"text": {"content": duration}}]});
    }

    if let Some(url) = metadata.get("url") {
        properties["Episode URL"] = json!({"url": url});
    }

    properties
}

/// Normalize the published date out of the front matter.
///
/// `published_date` in the localized `YYYY年MM月DD日` form becomes ISO
/// `YYYY-MM-DD`. When it is in neither form and a `published_at` ISO
/// timestamp exists, that is used instead with its `.000Z` suffix stripped.
/// Stray quoting is trimmed either way.
pub fn resolve_published_date(metadata: &BTreeMap<String, String>) -> Option<String> {
    let raw = strip_quotes(metadata.get("published_date")?);

    let date = if raw.contains('年') {
        localized_date_to_iso(raw).unwrap_or_else(|| raw.to_string())
    } else if let Some(at) = metadata.get("published_at") {
        strip_quotes(&at.replace(".000Z", "")).to_string()
    } else {
        raw.to_string()
    };

    Some(date)
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

fn localized_date_to_iso(raw: &str) -> Option<String> {
    let (year, rest) = raw.split_once('年')?;
    let (month, rest) = rest.split_once('月')?;
    let (day, _) = rest.split_once('日')?;

    if is_digits(year, 4) && is_digits(month, 2) && is_digits(day, 2) {
        Some(format!("{year}-{month}-{day}"))
    } else {
        None
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn localized_date_converts_to_iso() {
        let m = metadata(&[("published_date", "2025年07月16日")]);
        assert_eq!(resolve_published_date(&m).as_deref(), Some("2025-07-16"));
    }

    #[test]
    fn iso_timestamp_fallback_strips_suffix() {
        let m = metadata(&[
            ("published_date", "unparsed"),
            ("published_at", "2025-07-16T08:30:00.000Z"),
        ]);
        assert_eq!(
            resolve_published_date(&m).as_deref(),
            Some("2025-07-16T08:30:00")
        );
    }

    #[test]
    fn quoting_is_trimmed() {
        let m = metadata(&[("published_date", "\"2025年07月16日\"")]);
        assert_eq!(resolve_published_date(&m).as_deref(), Some("2025-07-16"));
    }

    #[test]
    fn missing_date_yields_none() {
        assert_eq!(resolve_published_date(&metadata(&[])), None);
    }

    #[test]
    fn malformed_localized_date_passes_through() {
        let m = metadata(&[("published_date", "2025年7月16日")]);
        // Single-digit month doesn't match the localized pattern.
        assert_eq!(resolve_published_date(&m).as_deref(), Some("2025年7月16日"));
    }

    #[test]
    fn properties_include_only_present_keys() {
        let m = metadata(&[
            ("title", "第42期"),
            ("podcast_name", "科技聊天"),
            ("published_date", "2025年07月16日"),
            ("duration_text", "1小时23分钟"),
            ("url", "https://example.com/ep/42"),
        ]);
        let props = page_properties(&m);

        assert_eq!(props["标题"]["title"][0]["text"]["content"], "第42期");
        assert_eq!(props["主播"]["rich_text"][0]["text"]["content"], "科技聊天");
        assert_eq!(props["发布日期"]["date"]["start"], "2025-07-16");
        assert_eq!(props["时长"]["rich_text"][0]["text"]["content"], "1小时23分钟");
        assert_eq!(props["Episode URL"]["url"], "https://example.com/ep/42");
    }

    #[test]
    fn title_defaults_to_untitled() {
        let props = page_properties(&metadata(&[]));
        assert_eq!(props["标题"]["title"][0]["text"]["content"], "Untitled");
        assert!(props.get("发布日期").is_none());
    }
}
