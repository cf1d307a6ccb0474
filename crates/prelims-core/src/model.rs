//! Core data model types for prelims.
//!
//! These are the canonical shapes every other module works with: the
//! normalized [`Question`], the persisted [`QuizResult`], and the paper
//! enumeration that selects a marking scheme.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default explanation used when a record carries none.
pub const NO_EXPLANATION: &str = "No explanation.";

/// Stable identifier of a question, compared by equality.
///
/// Raw banks use both numeric and string ids; both are rendered to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A user's selections for one attempt, keyed by question id.
///
/// Absent entries mean the question was skipped.
pub type Answers = BTreeMap<QuestionId, usize>;

/// The two exam papers, each with its own marking scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    /// General Studies paper 1.
    #[default]
    Gs1,
    /// Civil Services Aptitude Test (paper 2).
    Csat,
}

impl Paper {
    /// Infer the paper from a bank file name: any name containing `csat`
    /// belongs to the CSAT paper, everything else to GS1.
    pub fn infer_from_source(source: &str) -> Self {
        if source.to_lowercase().contains("csat") {
            Paper::Csat
        } else {
            Paper::Gs1
        }
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paper::Gs1 => write!(f, "gs1"),
            Paper::Csat => write!(f, "csat"),
        }
    }
}

impl FromStr for Paper {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gs1" => Ok(Paper::Gs1),
            "csat" => Ok(Paper::Csat),
            other => Err(format!("unknown paper: {other}")),
        }
    }
}

/// A canonical, fully-defaulted question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub paper: Paper,
    pub subject: String,
    pub topic: String,
    /// Exam year, or `Model` for author-written questions.
    pub year: String,
    pub difficulty: String,
    /// Question format as tagged in the bank (`standard` unless stated).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct: usize,
    pub explanation: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub linked_concepts: Vec<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    /// Shared reading-comprehension passage.
    #[serde(default)]
    pub parent_text: Option<String>,
}

pub(crate) fn default_kind() -> String {
    "standard".to_string()
}

impl Question {
    /// Whether `selection` is the correct option.
    pub fn is_correct(&self, selection: usize) -> bool {
        selection == self.correct
    }
}

/// A question as it appeared in a finished attempt, with the user's choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(flatten)]
    pub question: Question,
    #[serde(rename = "userSel", default, skip_serializing_if = "Option::is_none")]
    pub user_sel: Option<usize>,
}

/// The persisted record of one completed quiz attempt.
///
/// Created once at submission and never mutated afterwards. Every field
/// defaults so that partially-written history entries still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizResult {
    pub id: Uuid,
    /// Net score, exact to two decimal places.
    pub score: f64,
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub attempted: u32,
    /// Subject from the session config; `None` groups under `Mixed`.
    pub subject: Option<String>,
    pub paper: Paper,
    /// Integer percentage of attempted questions answered correctly.
    pub accuracy: u32,
    /// Total seconds spent across all questions.
    pub time_spent: u64,
    pub quiz: Vec<AnsweredQuestion>,
    pub timestamp: DateTime<Utc>,
    /// Reserved for remote sync; always `false`.
    pub synced: bool,
}
