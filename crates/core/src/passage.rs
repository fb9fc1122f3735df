use std::sync::OnceLock;

use regex::Regex;

/// Characters that end a line for joining purposes: a line ending in one of
/// these starts a fresh line instead of absorbing the next.
const TERMINAL: [char; 6] = ['.', '?', '!', '"', ')', ':'];

/// Clean document-extraction artifacts out of long-form passage text.
///
/// Two passes: strip the margin line-number annotations the extractor
/// interleaves into passages ("ine (5)" fragments and line-leading "(10)"
/// markers), then rejoin hard-wrapped lines -- a blank line is a paragraph
/// break (collapsed to one), and any other line appends to the previous one
/// with a single space unless that line already ends in terminal
/// punctuation.
///
/// Idempotent: cleaned output contains no artifacts and every line either
/// ends terminally or was freshly segmented, so a second pass is a no-op.
pub fn clean_passage_text(raw: &str) -> String {
    static RE_LABEL: OnceLock<Regex> = OnceLock::new();
    let re_label = RE_LABEL.get_or_init(|| Regex::new(r"\bine\s*\(\d+\)\s*").unwrap());
    static RE_LEADING: OnceLock<Regex> = OnceLock::new();
    let re_leading = RE_LEADING.get_or_init(|| Regex::new(r"(?m)^\s*\(\d+\)\s*").unwrap());

    let text = re_label.replace_all(raw, "");
    let text = re_leading.replace_all(&text, "");

    let mut cleaned: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if cleaned.last().is_some_and(|prev| !prev.is_empty()) {
                cleaned.push(String::new());
            }
            continue;
        }
        match cleaned.last_mut() {
            Some(prev) if !prev.is_empty() && !prev.ends_with(&TERMINAL[..]) => {
                prev.push(' ');
                prev.push_str(line);
            }
            _ => cleaned.push(line.to_string()),
        }
    }

    cleaned.join("\n").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
