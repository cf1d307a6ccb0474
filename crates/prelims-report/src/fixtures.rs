//! Shared builders for unit tests.

use chrono::Utc;
use prelims_core::model::{AnsweredQuestion, Paper, Question, QuizResult};
use prelims_core::statistics::{classify_subjects, compute_lifetime_stats, syllabus_progress};

use crate::snapshot::StatsReport;

fn make_question(id: &str, subject: &str) -> Question {
    Question {
        id: id.into(),
        paper: Paper::Gs1,
        subject: subject.into(),
        topic: "General".into(),
        year: "2023".into(),
        difficulty: "Medium".into(),
        kind: "standard".into(),
        text: format!("Which <b>statement</b> about {subject} is correct?"),
        options: vec!["1 only".into(), "2 only".into()],
        correct: 0,
        explanation: "Statement 2 is incorrect.".into(),
        tags: vec![],
        notes: None,
        linked_concepts: vec![],
        img_url: None,
        parent_text: None,
    }
}

pub(crate) fn make_test_report() -> StatsReport {
    let result = QuizResult {
        id: uuid::Uuid::nil(),
        score: 1.34,
        total: 3,
        correct: 1,
        wrong: 1,
        skipped: 1,
        attempted: 2,
        subject: Some("Indian Polity".into()),
        accuracy: 50,
        time_spent: 95,
        quiz: vec![
            AnsweredQuestion {
                question: make_question("1", "Indian Polity"),
                user_sel: Some(0),
            },
            AnsweredQuestion {
                question: make_question("2", "Indian Polity"),
                user_sel: Some(1),
            },
            AnsweredQuestion {
                question: make_question("3", "Environment"),
                user_sel: None,
            },
        ],
        timestamp: Utc::now(),
        ..Default::default()
    };
    let history = vec![result.clone()];
    let stats = compute_lifetime_stats(&history, 10);
    StatsReport {
        generated_at: Utc::now(),
        swot: classify_subjects(&stats.subjects),
        stats,
        streak_days: 3,
        syllabus: syllabus_progress(&history, 0),
        last_result: Some(result),
    }
}
