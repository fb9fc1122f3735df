use std::sync::OnceLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Input contract
// ---------------------------------------------------------------------------

/// One bookmark from the document outline: nesting depth (1-based), title,
/// and 1-based start page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub title: String,
    pub page: u32,
}

impl OutlineEntry {
    pub fn new(depth: usize, title: impl Into<String>, page: u32) -> Self {
        OutlineEntry {
            depth,
            title: title.into(),
            page,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-test boundaries
// ---------------------------------------------------------------------------

/// Page boundaries for one practice test, derived purely from the outline.
///
/// `answer_key_page` and `explanation_start` stay `None` when the outline
/// carries no such entry; the per-test pipeline turns that into
/// [`ExtractError::OutlineIncomplete`](crate::ExtractError::OutlineIncomplete)
/// rather than failing the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBoundaries {
    pub test_number: u32,
    pub start_page: u32,
    /// Section label -> start page, in outline discovery order.
    pub sections: Vec<(String, u32)>,
    pub answer_key_page: Option<u32>,
    pub explanation_start: Option<u32>,
    /// One past the last explanation page: the next test's start page, or
    /// one past the end of the document for the final test.
    pub explanation_end: u32,
}

/// A labeled section's page window, end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBoundary {
    pub label: String,
    pub start: u32,
    pub end: u32,
}

fn practice_test_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Practice Test (\d+)").unwrap())
}

/// Walk the outline and compute every test's page boundaries.
///
/// A depth-1 entry titled "Practice Test N" opens a new test context;
/// depth-2 entries until the next such entry attach to it, classified by
/// substring match only. Boundaries come from outline structure alone,
/// never from body text.
pub fn segment_outline(entries: &[OutlineEntry], page_count: u32) -> Vec<TestBoundaries> {
    let mut tests: Vec<TestBoundaries> = Vec::new();

    for entry in entries {
        if entry.depth == 1 && entry.title.contains("Practice Test") {
            if let Some(caps) = practice_test_re().captures(&entry.title) {
                if let Ok(test_number) = caps[1].parse::<u32>() {
                    tests.push(TestBoundaries {
                        test_number,
                        start_page: entry.page,
                        sections: Vec::new(),
                        answer_key_page: None,
                        explanation_start: None,
                        explanation_end: 0,
                    });
                }
            }
        } else if entry.depth == 2 {
            let Some(current) = tests.last_mut() else {
                continue;
            };
            let title = entry.title.trim();
            if title.contains("Answer Key") {
                current.answer_key_page = Some(entry.page);
            } else if title.contains("Answer Explanation") {
                current.explanation_start = Some(entry.page);
            } else if title.contains("Section") {
                current.sections.push((title.to_string(), entry.page));
            }
        }
    }

    // Each test's explanations run up to the next discovered test, or one
    // past the end of the document.
    for i in 0..tests.len() {
        tests[i].explanation_end = match tests.get(i + 1) {
            Some(next) => next.start_page,
            None => page_count + 1,
        };
    }

    tests.sort_by_key(|t| t.test_number);
    tests
}

/// Order a test's discovered section labels by page and pair each with its
/// end boundary: the next section's start, then the answer-key page, with
/// `start + 15` as the fallback when no answer-key entry exists.
pub fn section_boundaries(test: &TestBoundaries) -> Vec<SectionBoundary> {
    let mut ordered = test.sections.clone();
    ordered.sort_by_key(|(_, page)| *page);

    ordered
        .iter()
        .enumerate()
        .map(|(i, (label, start))| {
            let end = match ordered.get(i + 1) {
                Some((_, next_start)) => *next_start,
                None => test.answer_key_page.unwrap_or(start + 15),
            };
            SectionBoundary {
                label: label.clone(),
                start: *start,
                end,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outline() -> Vec<OutlineEntry> {
        vec![
            OutlineEntry::new(1, "Introduction", 1),
            OutlineEntry::new(1, "Practice Test 1", 10),
            OutlineEntry::new(2, "Section 1 Analytical Writing", 11),
            OutlineEntry::new(2, "Section 2 Verbal Reasoning", 13),
            OutlineEntry::new(2, "Section 3 Quantitative Reasoning", 20),
            OutlineEntry::new(2, "Answer Key", 28),
            OutlineEntry::new(2, "Answer Explanations", 30),
            OutlineEntry::new(1, "Practice Test 2", 50),
            OutlineEntry::new(2, "Section 1 Analytical Writing", 51),
            OutlineEntry::new(2, "Answer Key", 60),
            OutlineEntry::new(2, "Answer Explanations", 62),
        ]
    }

    #[test]
    fn segments_tests_and_classifies_children() {
        let tests = segment_outline(&sample_outline(), 90);

        assert_eq!(tests.len(), 2);
        let first = &tests[0];
        assert_eq!(first.test_number, 1);
        assert_eq!(first.start_page, 10);
        assert_eq!(first.answer_key_page, Some(28));
        assert_eq!(first.explanation_start, Some(30));
        assert_eq!(first.sections.len(), 3);
        assert_eq!(first.sections[0].0, "Section 1 Analytical Writing");
    }

    #[test]
    fn explanation_end_is_next_test_start() {
        let tests = segment_outline(&sample_outline(), 90);
        assert_eq!(tests[0].explanation_end, 50);
    }

    #[test]
    fn last_test_explanation_end_is_one_past_document() {
        let tests = segment_outline(&sample_outline(), 90);
        assert_eq!(tests[1].explanation_end, 91);
    }

    #[test]
    fn entries_before_first_test_are_ignored() {
        let entries = vec![
            OutlineEntry::new(2, "Answer Key", 3),
            OutlineEntry::new(1, "Practice Test 1", 10),
        ];
        let tests = segment_outline(&entries, 20);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].answer_key_page, None);
    }

    #[test]
    fn missing_answer_key_stays_none() {
        let entries = vec![
            OutlineEntry::new(1, "Practice Test 3", 10),
            OutlineEntry::new(2, "Section 1 Analytical Writing", 11),
        ];
        let tests = segment_outline(&entries, 20);
        assert_eq!(tests[0].answer_key_page, None);
        assert_eq!(tests[0].explanation_start, None);
    }

    #[test]
    fn depth_one_without_test_number_is_not_a_test() {
        let entries = vec![OutlineEntry::new(1, "Practice Test Strategies", 5)];
        assert!(segment_outline(&entries, 20).is_empty());
    }

    #[test]
    fn tests_sorted_by_number() {
        let entries = vec![
            OutlineEntry::new(1, "Practice Test 2", 50),
            OutlineEntry::new(1, "Practice Test 1", 10),
        ];
        let tests = segment_outline(&entries, 90);
        assert_eq!(tests[0].test_number, 1);
        assert_eq!(tests[1].test_number, 2);
        // Discovery order still drives the explanation chain.
        assert_eq!(tests[1].explanation_end, 10);
        assert_eq!(tests[0].explanation_end, 91);
    }

    #[test]
    fn section_boundaries_ordered_by_page() {
        let tests = segment_outline(&sample_outline(), 90);
        let bounds = section_boundaries(&tests[0]);

        assert_eq!(bounds.len(), 3);
        assert_eq!(bounds[0].label, "Section 1 Analytical Writing");
        assert_eq!((bounds[0].start, bounds[0].end), (11, 13));
        assert_eq!((bounds[1].start, bounds[1].end), (13, 20));
        // Last section runs up to the answer key.
        assert_eq!((bounds[2].start, bounds[2].end), (20, 28));
    }

    #[test]
    fn last_section_falls_back_to_fixed_window() {
        let test = TestBoundaries {
            test_number: 1,
            start_page: 10,
            sections: vec![("Section 1 Analytical Writing".to_string(), 11)],
            answer_key_page: None,
            explanation_start: None,
            explanation_end: 40,
        };
        let bounds = section_boundaries(&test);
        assert_eq!((bounds[0].start, bounds[0].end), (11, 26));
    }
}
