//! Question bank normalizer.
//!
//! Raw banks come from several hand-maintained sources that disagree on field
//! names. Each record is read as a loose JSON value and mapped onto one strict
//! [`Question`]; every alias is an explicit branch with a fixed priority.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::model::{default_kind, Paper, Question, QuestionId, NO_EXPLANATION};

const DEFAULT_CLASSIFICATION: &str = "General";
const DEFAULT_YEAR: &str = "Model";
const DEFAULT_DIFFICULTY: &str = "Medium";

/// A data-quality issue found while normalizing a bank.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The bank file the record came from.
    pub source: String,
    /// The question id (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// The normalized contents of one bank file.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBank {
    pub questions: Vec<Question>,
    pub warnings: Vec<ValidationWarning>,
}

/// Pull the record list out of a bank document.
///
/// A bank is either a bare array of records or an object with a `questions`
/// array. Anything else holds no records.
pub fn extract_records(document: &Value) -> Option<&[Value]> {
    match document {
        Value::Array(records) => Some(records),
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

/// Normalize a single raw record into a canonical question.
///
/// Never fails: every field falls back to a documented default. `position`
/// is the record's index within its bank and is only used to synthesize an
/// id for records that carry none.
pub fn normalize_question(raw: &Value, source: &str, position: usize) -> Question {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let id = scalar_string(record, "id")
        .map(QuestionId::from)
        .unwrap_or_else(|| QuestionId::new(format!("{source}#{position}")));

    let paper = scalar_string(record, "paper")
        .and_then(|p| p.parse::<Paper>().ok())
        .unwrap_or_else(|| Paper::infer_from_source(source));

    Question {
        id,
        paper,
        subject: scalar_string(record, "subject")
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string()),
        topic: scalar_string(record, "topic").unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string()),
        year: scalar_string(record, "year").unwrap_or_else(|| DEFAULT_YEAR.to_string()),
        difficulty: scalar_string(record, "difficulty")
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        kind: scalar_string(record, "type").unwrap_or_else(default_kind),
        text: first_string(record, &["text", "question_text"]).unwrap_or_default(),
        options: string_list(record, &["options"]),
        correct: correct_index(record).unwrap_or(0),
        explanation: scalar_string(record, "explanation")
            .unwrap_or_else(|| NO_EXPLANATION.to_string()),
        tags: string_list(record, &["tags"]),
        notes: scalar_string(record, "notes"),
        linked_concepts: string_list(record, &["linked_concepts", "linkedConcepts"]),
        img_url: first_string(record, &["imgUrl", "image_url"]),
        parent_text: first_string(record, &["parentText", "passage_text"]),
    }
}

/// Normalize a whole bank document and audit it.
///
/// The audit never rejects records; it reports the ones whose defaults may
/// hide a broken answer key.
pub fn normalize_bank(document: &Value, source: &str) -> NormalizedBank {
    let Some(records) = extract_records(document) else {
        tracing::warn!("{source}: bank is neither an array nor an object with `questions`");
        return NormalizedBank {
            questions: Vec::new(),
            warnings: vec![ValidationWarning {
                source: source.to_string(),
                question_id: None,
                message: "bank holds no question list".into(),
            }],
        };
    };

    let mut bank = NormalizedBank::default();
    let mut seen_ids = HashSet::new();

    for (position, raw) in records.iter().enumerate() {
        let question = normalize_question(raw, source, position);
        let mut warn = |message: String| {
            bank.warnings.push(ValidationWarning {
                source: source.to_string(),
                question_id: Some(question.id.clone()),
                message,
            });
        };

        let has_answer_key = raw.as_object().and_then(correct_index).is_some();
        if !has_answer_key {
            warn("no correct-answer field; defaulted to option 0".into());
        }
        if !question.options.is_empty() && question.correct >= question.options.len() {
            warn(format!(
                "correct index {} is out of range for {} options",
                question.correct,
                question.options.len()
            ));
        }
        if question.text.trim().is_empty() {
            warn("question text is empty".into());
        }
        if question.options.is_empty() {
            warn("question has no options".into());
        }
        if !seen_ids.insert(question.id.clone()) {
            warn(format!("duplicate question id: {}", question.id));
        }

        bank.questions.push(question);
    }

    bank
}

/// A string-ish scalar field. Empty strings and `null` count as absent;
/// numbers and booleans are rendered.
fn scalar_string(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_string(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| scalar_string(record, key))
}

/// The first alias holding an array, with non-string items rendered.
fn string_list(record: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| match record.get(*key) {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

/// `correct`, then `correct_option_index`. Numeric strings are accepted.
fn correct_index(record: &Map<String, Value>) -> Option<usize> {
    ["correct", "correct_option_index"]
        .iter()
        .find_map(|key| match record.get(*key)? {
            Value::Number(n) => n.as_u64().map(|n| n as usize),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}
