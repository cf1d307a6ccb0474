//! Shared builders for unit tests.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::model::{AnsweredQuestion, Paper, Question, QuizResult, NO_EXPLANATION};

pub(crate) fn question(id: &str, correct: usize) -> Question {
    Question {
        id: id.into(),
        paper: Paper::Gs1,
        subject: "General".into(),
        topic: "General".into(),
        year: "Model".into(),
        difficulty: "Medium".into(),
        kind: "standard".into(),
        text: format!("Question {id}"),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct,
        explanation: NO_EXPLANATION.into(),
        tags: vec![],
        notes: None,
        linked_concepts: vec![],
        img_url: None,
        parent_text: None,
    }
}

pub(crate) fn question_in(id: &str, subject: &str, topic: &str, paper: Paper) -> Question {
    Question {
        subject: subject.into(),
        topic: topic.into(),
        paper,
        ..question(id, 0)
    }
}

pub(crate) fn answered(id: &str, subject: &str, user_sel: Option<usize>) -> AnsweredQuestion {
    AnsweredQuestion {
        question: question_in(id, subject, "General", Paper::Gs1),
        user_sel,
    }
}

/// A result with only the aggregate counters filled in.
pub(crate) fn result_with(subject: Option<&str>, total: u32, correct: u32, wrong: u32) -> QuizResult {
    let attempted = correct + wrong;
    QuizResult {
        id: Uuid::new_v4(),
        total,
        correct,
        wrong,
        attempted,
        skipped: total.saturating_sub(attempted),
        subject: subject.map(str::to_string),
        timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        ..Default::default()
    }
}
