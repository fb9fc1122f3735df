use std::sync::OnceLock;

use regex::Regex;

use crate::model::ExplanationTable;

fn section_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The book sets explanation section headings in caps with an em-dash,
    // but extraction sometimes degrades the dash.
    RE.get_or_init(|| Regex::new(r"^SECTION\s+(\d+)\s*[\u{2014}\u{2013}-]\s*(.*)$").unwrap())
}

fn question_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+").unwrap())
}

/// Parse the explanation block into a per-section, per-question table.
///
/// Line-oriented state machine; state is (current section key, current
/// question number, accumulated lines) and lives only in this function's
/// locals. Explanation prose is reflowed: the lines between one question
/// marker and the next are joined with single spaces, in document order.
pub fn parse_explanations(text: &str) -> ExplanationTable {
    let mut table = ExplanationTable::new();
    let mut section: Option<String> = None;
    let mut question: Option<u32> = None;
    let mut accumulated: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();

        if let Some(caps) = section_header_re().captures(line) {
            flush(&mut table, section.as_deref(), question.take(), &mut accumulated);
            section = Some(format!("Section {}", &caps[1]));
            continue;
        }

        if section.is_none() {
            continue;
        }

        if let Some(caps) = question_marker_re().captures(line) {
            if let Ok(number) = caps[1].parse::<u32>() {
                flush(&mut table, section.as_deref(), question.take(), &mut accumulated);
                question = Some(number);
                let rest = &line[caps[0].len()..];
                if !rest.is_empty() {
                    accumulated.push(rest.to_string());
                }
                continue;
            }
        }

        if question.is_some() && !line.is_empty() {
            accumulated.push(line.to_string());
        }
    }

    flush(&mut table, section.as_deref(), question.take(), &mut accumulated);
    table
}

/// Commit the open accumulator, if a (section, question) pair is open.
fn flush(
    table: &mut ExplanationTable,
    section: Option<&str>,
    question: Option<u32>,
    accumulated: &mut Vec<String>,
) {
    if let (Some(section), Some(question)) = (section, question) {
        let text = accumulated.join(" ").trim().to_string();
        table
            .entry(section.to_string())
            .or_default()
            .insert(question, text);
    }
    accumulated.clear();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EXPLANATION_TEXT: &str = "\
Answer Explanations
SECTION 2 \u{2014} Verbal Reasoning
1.   (A) The first clause signals a
contrast, so the blank needs a word
meaning reversal.
2.   (B, F) Both choices preserve the
sentence's meaning.
SECTION 3 \u{2013} Quantitative Reasoning
1.   (C) The two quantities are equal.
";

    #[test]
    fn sections_keyed_by_number() {
        let table = parse_explanations(EXPLANATION_TEXT);
        assert!(table.contains_key("Section 2"));
        assert!(table.contains_key("Section 3"));
    }

    #[test]
    fn continuation_lines_are_reflowed_with_spaces() {
        let table = parse_explanations(EXPLANATION_TEXT);
        assert_eq!(
            table["Section 2"][&1],
            "(A) The first clause signals a contrast, so the blank needs a word meaning reversal."
        );
    }

    #[test]
    fn new_marker_flushes_previous_question() {
        let table = parse_explanations(EXPLANATION_TEXT);
        assert_eq!(
            table["Section 2"][&2],
            "(B, F) Both choices preserve the sentence's meaning."
        );
    }

    #[test]
    fn section_header_flushes_open_accumulator() {
        let table = parse_explanations(EXPLANATION_TEXT);
        // Question 2's text must not bleed into Section 3.
        assert_eq!(table["Section 3"][&1], "(C) The two quantities are equal.");
        assert_eq!(table["Section 3"].len(), 1);
    }

    #[test]
    fn end_of_input_flushes_last_question() {
        let table = parse_explanations("SECTION 1 - Verbal\n3. Final answer text\n");
        assert_eq!(table["Section 1"][&3], "Final answer text");
    }

    #[test]
    fn tolerates_all_three_dashes() {
        for dash in ['\u{2014}', '\u{2013}', '-'] {
            let text = format!("SECTION 4 {dash} Quantitative Reasoning\n1. Text\n");
            let table = parse_explanations(&text);
            assert!(table.contains_key("Section 4"), "dash {dash:?}");
        }
    }

    #[test]
    fn text_before_first_section_is_ignored() {
        let table = parse_explanations("1. stray\nSECTION 1 - Verbal\n1. real\n");
        assert_eq!(table["Section 1"][&1], "real");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped_not_accumulated() {
        let table = parse_explanations("SECTION 1 - Verbal\n1. first\n\nsecond\n");
        assert_eq!(table["Section 1"][&1], "first second");
    }

    #[test]
    fn marker_without_trailing_space_is_continuation() {
        // "5." alone does not open a question; it reads as layout noise.
        let table = parse_explanations("SECTION 1 - Verbal\n1. kept\n5.\n");
        assert_eq!(table["Section 1"].len(), 1);
        assert_eq!(table["Section 1"][&1], "kept 5.");
    }
}
