use std::sync::OnceLock;

use regex::Regex;

use crate::model::{AnswerTable, AnswerValue};

fn section_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Section (\d+):\s*(.*)$").unwrap())
}

fn answer_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+(.*)$").unwrap())
}

/// Cut the answer-key text at the first "Answer Explanations" heading.
///
/// The answer key is read with page granularity and routinely spills into
/// the first explanation page; everything past the heading belongs to the
/// explanation parser.
pub fn truncate_at_explanations(text: &str) -> &str {
    match text.find("Answer Explanations") {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Parse the answer-key text into a per-section answer table.
///
/// Line-oriented state machine; the only state is the current section key.
/// Lines before the first `Section N:` header, and lines matching no known
/// pattern, are skipped without error -- the text is noisy PDF extraction
/// output and a strict grammar would reject valid books over cosmetic
/// formatting differences.
pub fn parse_answer_key(text: &str) -> AnswerTable {
    let mut table = AnswerTable::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = section_header_re().captures(line) {
            let key = format!("Section {}", &caps[1]);
            table.entry(key.clone()).or_default();
            current = Some(key);
            continue;
        }

        let Some(section) = current.as_ref() else {
            continue;
        };

        if let Some(caps) = answer_line_re().captures(line) {
            let Ok(number) = caps[1].parse::<u32>() else {
                continue;
            };
            let raw = caps[2].trim();
            if raw.is_empty() {
                continue;
            }
            if let Some(answers) = table.get_mut(section) {
                answers.insert(number, parse_answer_value(raw));
            }
        }
    }

    table
}

/// Classify one raw answer token into its [`AnswerValue`] shape.
pub fn parse_answer_value(raw: &str) -> AnswerValue {
    if raw.starts_with("Sentence") {
        return AnswerValue::SentenceRef(raw.to_string());
    }

    if raw.contains(',') {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts
            .iter()
            .all(|p| p.len() == 1 && p.chars().all(|c| c.is_ascii_uppercase()))
        {
            return AnswerValue::LetterSet(parts.iter().map(|p| p.to_string()).collect());
        }
    }

    if let Some((first, _)) = raw.split_once(" or ") {
        return AnswerValue::Numeric(first.trim().to_string());
    }

    if raw.len() == 1 && matches!(raw.chars().next(), Some('A'..='E')) {
        return AnswerValue::Letter(raw.to_string());
    }

    AnswerValue::Numeric(raw.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
