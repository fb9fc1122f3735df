use std::sync::OnceLock;

use regex::Regex;

use crate::format::BookFormat;
use crate::model::{
    AnswerMap, AnswerTable, ExplanationMap, ExplanationTable, MockTest, Section, SectionKind,
};
use crate::questions::{synthesize_analytical_writing, synthesize_scored_section};
use crate::ExtractError;

fn section_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Section (\d+)").unwrap())
}

/// The section number embedded in an outline label, or 0 when the label
/// carries none.
pub fn section_number_from_label(label: &str) -> u32 {
    section_number_re()
        .captures(label)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Build one section record from its label, raw page text, and the test's
/// lookup tables.
///
/// The label's section number keys into both tables ("Section N"); a label
/// matching no known kind is reported as
/// [`ExtractError::SectionLabelUnrecognized`] and the caller drops it.
pub fn build_section(
    format: &BookFormat,
    test_number: u32,
    label: &str,
    raw_text: &str,
    answers: &AnswerTable,
    explanations: &ExplanationTable,
) -> Result<Section, ExtractError> {
    let kind = format.classify_label(label)?;
    let section_number = section_number_from_label(label);
    let key = format!("Section {section_number}");
    let rules = format.rules_for(kind);

    let questions = match kind {
        SectionKind::AnalyticalWriting => {
            synthesize_analytical_writing(test_number, section_number, raw_text)
        }
        SectionKind::Verbal | SectionKind::Quantitative => {
            let empty_answers = AnswerMap::new();
            let empty_explanations = ExplanationMap::new();
            let section_answers = answers.get(&key).unwrap_or(&empty_answers);
            let section_explanations = explanations.get(&key).unwrap_or(&empty_explanations);
            synthesize_scored_section(
                test_number,
                section_number,
                rules.question_count,
                &rules.rules,
                rules.fallback,
                section_answers,
                section_explanations,
            )
        }
    };

    Ok(Section {
        id: format!("BT{test_number}-S{section_number}"),
        section_number,
        kind,
        name: format.section_display_name(kind, section_number),
        time_minutes: rules.time_minutes,
        question_count: rules.question_count,
        questions,
    })
}

/// Compose the final test record from its assembled sections.
pub fn build_test(format: &BookFormat, test_number: u32, sections: Vec<Section>) -> MockTest {
    MockTest {
        id: format.test_id(test_number),
        name: format.test_name(test_number),
        source: format.source.to_string(),
        source_short: format.source_short.to_string(),
        description: format.test_description(test_number),
        section_count: sections.len() as u32,
        total_time_minutes: format.total_time_minutes(),
        format: format.format_tag.to_string(),
        sections,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
