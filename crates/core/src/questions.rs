use std::ops::RangeInclusive;

use crate::model::{
    AnswerMap, AnswerValue, CorrectAnswer, ExplanationMap, Question, QuestionKind, SelectCount,
};
use crate::passage::clean_passage_text;

/// Explanation used when the explanation block has no entry for a question.
pub const FALLBACK_EXPLANATION: &str = "See answer key.";

// ---------------------------------------------------------------------------
// Classification rules
// ---------------------------------------------------------------------------

/// One positional classification rule: question positions in `positions`
/// get `kind`.
///
/// The thresholds these rules encode are specific to one book's layout,
/// not a general grammar -- which is exactly why they live in data handed
/// in by the format description rather than in the classifier itself.
#[derive(Debug, Clone)]
pub struct PositionRule {
    pub positions: RangeInclusive<u32>,
    pub kind: QuestionKind,
}

impl PositionRule {
    pub fn new(positions: RangeInclusive<u32>, kind: QuestionKind) -> Self {
        PositionRule { positions, kind }
    }
}

/// What to do with positions no rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackRule {
    /// Every uncovered position gets this kind.
    Fixed(QuestionKind),
    /// Classify by the shape of the answer: a letter set is multi-select
    /// multiple choice, a single letter is single-select, anything else is
    /// numeric entry.
    AnswerShape,
}

/// Classify one question position against an ordered rule list.
pub fn classify(
    rules: &[PositionRule],
    fallback: FallbackRule,
    position: u32,
    answer: Option<&AnswerValue>,
) -> QuestionKind {
    for rule in rules {
        if rule.positions.contains(&position) {
            return rule.kind;
        }
    }
    match fallback {
        FallbackRule::Fixed(kind) => kind,
        FallbackRule::AnswerShape => match answer {
            Some(AnswerValue::LetterSet(_)) => QuestionKind::MultipleChoiceMulti,
            Some(AnswerValue::Letter(_)) => QuestionKind::MultipleChoiceSingle,
            _ => QuestionKind::NumericEntry,
        },
    }
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Synthesize the question record for one position.
///
/// Stems are deliberate placeholders: true stem/option extraction from the
/// body text is out of scope, and the consumer application renders these
/// records against the printed book.
pub fn synthesize_question(
    test_number: u32,
    section_number: u32,
    position: u32,
    kind: QuestionKind,
    answer: Option<&AnswerValue>,
    explanation: Option<&str>,
) -> Question {
    let id = question_id(test_number, section_number, position);
    let stem = format!(
        "[Question {position} - {} - see source material]",
        kind.stem_label()
    );
    let correct_answer = answer
        .map(AnswerValue::to_correct_answer)
        .unwrap_or_else(CorrectAnswer::missing);
    let explanation = explanation.unwrap_or(FALLBACK_EXPLANATION).to_string();

    let mut question = Question::new(id, kind, stem, correct_answer, explanation);

    match kind {
        QuestionKind::TextCompletion => {
            question.blanks = Some(match answer {
                Some(AnswerValue::LetterSet(letters)) if letters.len() == 3 => 3,
                Some(AnswerValue::LetterSet(letters)) if letters.len() == 2 => 2,
                _ => 1,
            });
        }
        QuestionKind::SentenceEquivalence => {
            question.select_count = Some(SelectCount::Count(2));
        }
        QuestionKind::ReadingComprehension => {
            if matches!(answer, Some(AnswerValue::LetterSet(_))) {
                question.select_count = Some(SelectCount::All);
            }
        }
        QuestionKind::MultipleChoiceMulti => {
            question.select_count = Some(SelectCount::All);
        }
        QuestionKind::QuantitativeComparison
        | QuestionKind::MultipleChoiceSingle
        | QuestionKind::NumericEntry
        | QuestionKind::AnalyticalWriting => {}
    }

    question
}

/// Synthesize all questions of a verbal or quantitative section.
pub fn synthesize_scored_section(
    test_number: u32,
    section_number: u32,
    question_count: u32,
    rules: &[PositionRule],
    fallback: FallbackRule,
    answers: &AnswerMap,
    explanations: &ExplanationMap,
) -> Vec<Question> {
    (1..=question_count)
        .map(|position| {
            let answer = answers.get(&position);
            let kind = classify(rules, fallback, position, answer);
            synthesize_question(
                test_number,
                section_number,
                position,
                kind,
                answer,
                explanations.get(&position).map(String::as_str),
            )
        })
        .collect()
}

/// Directions printed with every Analyze-an-Argument task in this book.
const AW_DIRECTIONS: &str = "Write a response in which you discuss what specific evidence is needed to evaluate the argument and explain how the evidence would weaken or strengthen the argument.";

/// Synthesize the single analytical-writing record. The section's raw text
/// is the essay prompt; "essay" marks that no machine-checkable answer
/// exists.
pub fn synthesize_analytical_writing(
    test_number: u32,
    section_number: u32,
    raw_text: &str,
) -> Vec<Question> {
    let mut question = Question::new(
        question_id(test_number, section_number, 1),
        QuestionKind::AnalyticalWriting,
        "Analyze an Argument".to_string(),
        CorrectAnswer::One("essay".to_string()),
        "This is an essay question - no single correct answer.".to_string(),
    );
    question.prompt = Some(clean_passage_text(raw_text));
    question.directions = Some(AW_DIRECTIONS.to_string());
    vec![question]
}

fn question_id(test_number: u32, section_number: u32, position: u32) -> String {
    format!("BT{test_number}-S{section_number}-Q{position}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
