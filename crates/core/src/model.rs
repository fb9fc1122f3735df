use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Answer values
// ---------------------------------------------------------------------------

/// A parsed answer-key value. Exactly one variant per question number.
///
/// The answer-key text is ambiguous about single-token answers ("A" vs
/// "129"); the parser resolves that ambiguity up front so every consumer
/// can match exhaustively instead of re-testing string shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// Single choice "A"-"E".
    Letter(String),
    /// Multi-select letters, original order preserved.
    LetterSet(Vec<String>),
    /// A reference of the form "Sentence N", kept verbatim.
    SentenceRef(String),
    /// Free-form numeric/text answer. Where the book lists several
    /// acceptable literal forms ("x or y"), only the first is retained.
    Numeric(String),
}

impl AnswerValue {
    /// The serialized form: a single string, or a list of strings for
    /// multi-select answers.
    pub fn to_correct_answer(&self) -> CorrectAnswer {
        match self {
            AnswerValue::Letter(s) | AnswerValue::SentenceRef(s) | AnswerValue::Numeric(s) => {
                CorrectAnswer::One(s.clone())
            }
            AnswerValue::LetterSet(letters) => CorrectAnswer::Many(letters.clone()),
        }
    }
}

/// The wire shape of a correct answer. A question with no answer-key entry
/// serializes as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

impl CorrectAnswer {
    pub fn missing() -> Self {
        CorrectAnswer::One(String::new())
    }
}

/// How many options a multi-select question expects: a fixed count
/// (serialized as a number) or "select all that apply" (serialized as the
/// string `"all"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCount {
    Count(u32),
    All,
}

impl Serialize for SelectCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SelectCount::Count(n) => serializer.serialize_u32(*n),
            SelectCount::All => serializer.serialize_str("all"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Question number -> answer, within one section.
pub type AnswerMap = BTreeMap<u32, AnswerValue>;
/// Section key (e.g. "Section 2") -> per-question answers.
pub type AnswerTable = BTreeMap<String, AnswerMap>;
/// Question number -> explanation prose, within one section.
pub type ExplanationMap = BTreeMap<u32, String>;
/// Section key -> per-question explanations.
pub type ExplanationTable = BTreeMap<String, ExplanationMap>;

// ---------------------------------------------------------------------------
// Question / Section / MockTest records
// ---------------------------------------------------------------------------

/// The eight question type tags recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    TextCompletion,
    SentenceEquivalence,
    ReadingComprehension,
    QuantitativeComparison,
    MultipleChoiceSingle,
    MultipleChoiceMulti,
    NumericEntry,
    AnalyticalWriting,
}

impl QuestionKind {
    /// Human-readable label used in placeholder stems.
    pub fn stem_label(&self) -> &'static str {
        match self {
            QuestionKind::TextCompletion => "Text Completion",
            QuestionKind::SentenceEquivalence => "Sentence Equivalence",
            QuestionKind::ReadingComprehension => "Reading Comprehension",
            QuestionKind::QuantitativeComparison => "Quantitative Comparison",
            QuestionKind::MultipleChoiceSingle => "Multiple Choice",
            QuestionKind::MultipleChoiceMulti => "Multiple Choice (Select All)",
            QuestionKind::NumericEntry => "Numeric Entry",
            QuestionKind::AnalyticalWriting => "Analytical Writing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Verbal,
    Quantitative,
    AnalyticalWriting,
}

/// One synthesized question record.
///
/// Optional attributes are type-specific; absent ones must not appear in
/// serialized output, which `skip_serializing_if` guarantees here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub stem: String,
    pub correct_answer: CorrectAnswer,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blanks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_count: Option<SelectCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<String>,
}

impl Question {
    /// A record with every optional attribute absent; synthesis fills in
    /// the ones its kind calls for.
    pub fn new(
        id: String,
        kind: QuestionKind,
        stem: String,
        correct_answer: CorrectAnswer,
        explanation: String,
    ) -> Self {
        Question {
            id,
            kind,
            stem,
            correct_answer,
            explanation,
            passage: None,
            blanks: None,
            select_count: None,
            prompt: None,
            directions: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub section_number: u32,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub name: String,
    pub time_minutes: u32,
    pub question_count: u32,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockTest {
    pub id: String,
    pub name: String,
    pub source: String,
    pub source_short: String,
    pub description: String,
    pub section_count: u32,
    pub total_time_minutes: u32,
    pub format: String,
    pub sections: Vec<Section>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json(value: &impl Serialize) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn correct_answer_single_serializes_as_string() {
        let value = AnswerValue::Letter("A".to_string()).to_correct_answer();
        assert_eq!(to_json(&value), serde_json::json!("A"));
    }

    #[test]
    fn correct_answer_set_serializes_as_list() {
        let value = AnswerValue::LetterSet(vec!["B".into(), "F".into()]).to_correct_answer();
        assert_eq!(to_json(&value), serde_json::json!(["B", "F"]));
    }

    #[test]
    fn select_count_forms() {
        assert_eq!(to_json(&SelectCount::Count(2)), serde_json::json!(2));
        assert_eq!(to_json(&SelectCount::All), serde_json::json!("all"));
    }

    #[test]
    fn question_kind_tags_are_snake_case() {
        assert_eq!(
            to_json(&QuestionKind::TextCompletion),
            serde_json::json!("text_completion")
        );
        assert_eq!(
            to_json(&QuestionKind::MultipleChoiceMulti),
            serde_json::json!("multiple_choice_multi")
        );
        assert_eq!(
            to_json(&SectionKind::AnalyticalWriting),
            serde_json::json!("analytical_writing")
        );
    }

    #[test]
    fn absent_optionals_do_not_appear() {
        let q = Question::new(
            "BT1-S2-Q7".to_string(),
            QuestionKind::ReadingComprehension,
            "stem".to_string(),
            CorrectAnswer::One("C".to_string()),
            "Because.".to_string(),
        );
        let json = to_json(&q);
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for key in ["id", "type", "stem", "correctAnswer", "explanation"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn present_optionals_use_camel_case_names() {
        let mut q = Question::new(
            "BT1-S2-Q3".to_string(),
            QuestionKind::SentenceEquivalence,
            "stem".to_string(),
            CorrectAnswer::missing(),
            "See answer key.".to_string(),
        );
        q.select_count = Some(SelectCount::Count(2));
        let json = to_json(&q);
        assert_eq!(json["selectCount"], serde_json::json!(2));
        assert_eq!(json["correctAnswer"], serde_json::json!(""));
    }

    #[test]
    fn section_and_test_field_names() {
        let section = Section {
            id: "BT1-S2".to_string(),
            section_number: 2,
            kind: SectionKind::Verbal,
            name: "Section 2 \u{2014} Verbal Reasoning".to_string(),
            time_minutes: 30,
            question_count: 20,
            questions: vec![],
        };
        let json = to_json(&section);
        assert_eq!(json["sectionNumber"], serde_json::json!(2));
        assert_eq!(json["timeMinutes"], serde_json::json!(30));
        assert_eq!(json["questionCount"], serde_json::json!(20));
        assert_eq!(json["type"], serde_json::json!("verbal"));

        let test = MockTest {
            id: "barrons-test-1".to_string(),
            name: "Barron's Practice Test 1".to_string(),
            source: "Barron's 6 GRE Practice Tests".to_string(),
            source_short: "Barron's".to_string(),
            description: "desc".to_string(),
            section_count: 5,
            total_time_minutes: 160,
            format: "old".to_string(),
            sections: vec![section],
        };
        let json = to_json(&test);
        assert_eq!(json["sourceShort"], serde_json::json!("Barron's"));
        assert_eq!(json["sectionCount"], serde_json::json!(5));
        assert_eq!(json["totalTimeMinutes"], serde_json::json!(160));
    }
}
