use crate::model::{QuestionKind, SectionKind};
use crate::questions::{FallbackRule, PositionRule};
use crate::ExtractError;

// ---------------------------------------------------------------------------
// Section rules
// ---------------------------------------------------------------------------

/// Per-kind section metadata and classification configuration.
#[derive(Debug, Clone)]
pub struct SectionRules {
    pub kind: SectionKind,
    pub time_minutes: u32,
    pub question_count: u32,
    /// Ordered positional rules; first match wins.
    pub rules: Vec<PositionRule>,
    pub fallback: FallbackRule,
}

// ---------------------------------------------------------------------------
// Book format
// ---------------------------------------------------------------------------

/// The declarative description of one supported book: naming, section
/// composition, time allotments, and classification thresholds.
///
/// Everything book-specific funnels through here so a different source
/// document could plug in different thresholds without touching the
/// parsers or the synthesizer.
#[derive(Debug, Clone)]
pub struct BookFormat {
    /// Format tag emitted on every test record.
    pub format_tag: &'static str,
    pub source: &'static str,
    pub source_short: &'static str,
    /// Section kinds in test order; drives the fixed total time.
    pub composition: Vec<SectionKind>,
    pub analytical_writing: SectionRules,
    pub verbal: SectionRules,
    pub quantitative: SectionRules,
}

impl BookFormat {
    /// Barron's *6 GRE Practice Tests*, old (pre-2023) five-section format.
    pub fn barrons() -> Self {
        BookFormat {
            format_tag: "old",
            source: "Barron's 6 GRE Practice Tests",
            source_short: "Barron's",
            composition: vec![
                SectionKind::AnalyticalWriting,
                SectionKind::Verbal,
                SectionKind::Quantitative,
                SectionKind::Verbal,
                SectionKind::Quantitative,
            ],
            analytical_writing: SectionRules {
                kind: SectionKind::AnalyticalWriting,
                time_minutes: 30,
                question_count: 1,
                rules: vec![],
                fallback: FallbackRule::Fixed(QuestionKind::AnalyticalWriting),
            },
            verbal: SectionRules {
                kind: SectionKind::Verbal,
                time_minutes: 30,
                question_count: 20,
                rules: vec![
                    PositionRule::new(1..=6, QuestionKind::TextCompletion),
                    PositionRule::new(13..=16, QuestionKind::SentenceEquivalence),
                ],
                fallback: FallbackRule::Fixed(QuestionKind::ReadingComprehension),
            },
            quantitative: SectionRules {
                kind: SectionKind::Quantitative,
                time_minutes: 35,
                question_count: 20,
                rules: vec![PositionRule::new(1..=5, QuestionKind::QuantitativeComparison)],
                fallback: FallbackRule::AnswerShape,
            },
        }
    }

    pub fn rules_for(&self, kind: SectionKind) -> &SectionRules {
        match kind {
            SectionKind::AnalyticalWriting => &self.analytical_writing,
            SectionKind::Verbal => &self.verbal,
            SectionKind::Quantitative => &self.quantitative,
        }
    }

    /// Map a section label from the outline to its kind by substring.
    pub fn classify_label(&self, label: &str) -> Result<SectionKind, ExtractError> {
        if label.contains("Analytical Writing") {
            Ok(SectionKind::AnalyticalWriting)
        } else if label.contains("Verbal") {
            Ok(SectionKind::Verbal)
        } else if label.contains("Quantitative") {
            Ok(SectionKind::Quantitative)
        } else {
            Err(ExtractError::SectionLabelUnrecognized(label.to_string()))
        }
    }

    /// Fixed total time: the sum of the composition's allotments, not of
    /// whatever sections survived assembly.
    pub fn total_time_minutes(&self) -> u32 {
        self.composition
            .iter()
            .map(|kind| self.rules_for(*kind).time_minutes)
            .sum()
    }

    pub fn test_id(&self, test_number: u32) -> String {
        format!("barrons-test-{test_number}")
    }

    pub fn test_name(&self, test_number: u32) -> String {
        format!("Barron's Practice Test {test_number}")
    }

    pub fn test_description(&self, test_number: u32) -> String {
        format!(
            "Full-length GRE practice test {test_number} from Barron's 6 GRE Practice Tests. \
             Includes Analytical Writing, 2 Verbal Reasoning sections (20 questions each, 30 min), \
             and 2 Quantitative Reasoning sections (20 questions each, 35 min)."
        )
    }

    /// Display name for a section, e.g. "Section 2 — Verbal Reasoning".
    pub fn section_display_name(&self, kind: SectionKind, section_number: u32) -> String {
        let suffix = match kind {
            SectionKind::AnalyticalWriting => "Analytical Writing",
            SectionKind::Verbal => "Verbal Reasoning",
            SectionKind::Quantitative => "Quantitative Reasoning",
        };
        format!("Section {section_number} \u{2014} {suffix}")
    }

    /// Output file name for one test's record.
    pub fn output_file_name(&self, test_number: u32) -> String {
        format!("barrons_test_{test_number}.json")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_is_five_sections_totalling_160_minutes() {
        let format = BookFormat::barrons();
        assert_eq!(format.composition.len(), 5);
        assert_eq!(format.total_time_minutes(), 160);
    }

    #[test]
    fn labels_classify_by_substring() {
        let format = BookFormat::barrons();
        assert_eq!(
            format.classify_label("Section 1 Analytical Writing").unwrap(),
            SectionKind::AnalyticalWriting
        );
        assert_eq!(
            format.classify_label("Section 2 Verbal Reasoning").unwrap(),
            SectionKind::Verbal
        );
        assert_eq!(
            format.classify_label("Section 3 Quantitative Reasoning").unwrap(),
            SectionKind::Quantitative
        );
    }

    #[test]
    fn unknown_label_is_an_error() {
        let format = BookFormat::barrons();
        assert!(matches!(
            format.classify_label("Section 6 Experimental"),
            Err(ExtractError::SectionLabelUnrecognized(_))
        ));
    }

    #[test]
    fn naming_patterns() {
        let format = BookFormat::barrons();
        assert_eq!(format.test_id(3), "barrons-test-3");
        assert_eq!(format.test_name(3), "Barron's Practice Test 3");
        assert_eq!(format.output_file_name(3), "barrons_test_3.json");
        assert_eq!(
            format.section_display_name(SectionKind::Verbal, 2),
            "Section 2 \u{2014} Verbal Reasoning"
        );
    }
}
