//! Negative-marking scorer.
//!
//! Marks are kept in integer hundredths so every score is exact to two
//! decimal places and no floating-point rounding is needed.

use serde::{Deserialize, Serialize};

use crate::model::{Answers, Paper, Question};

/// Marks awarded and deducted per question, in hundredths of a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkingScheme {
    pub correct_hundredths: i64,
    pub penalty_hundredths: i64,
}

impl MarkingScheme {
    /// GS1: +2.00 / −0.66.
    pub const GS1: MarkingScheme = MarkingScheme {
        correct_hundredths: 200,
        penalty_hundredths: 66,
    };

    /// CSAT: +2.50 / −0.83.
    pub const CSAT: MarkingScheme = MarkingScheme {
        correct_hundredths: 250,
        penalty_hundredths: 83,
    };

    pub fn for_paper(paper: Paper) -> Self {
        match paper {
            Paper::Gs1 => Self::GS1,
            Paper::Csat => Self::CSAT,
        }
    }

    /// Net score in hundredths.
    pub fn net_hundredths(&self, correct: u32, wrong: u32) -> i64 {
        correct as i64 * self.correct_hundredths - wrong as i64 * self.penalty_hundredths
    }
}

impl Paper {
    pub fn marking(self) -> MarkingScheme {
        MarkingScheme::for_paper(self)
    }
}

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub attempted: u32,
    /// Net score, exact to two decimal places.
    pub score: f64,
}

impl ScoreCard {
    /// Percentage of attempted questions answered correctly.
    pub fn accuracy(&self) -> u32 {
        percent(self.correct, self.attempted)
    }
}

/// Score an attempt.
///
/// Walks the quiz in order; a question is wrong only when a selection is
/// recorded and differs from the answer key. Answers for ids outside the quiz
/// are never looked at.
pub fn score_quiz(questions: &[Question], answers: &Answers, paper: Paper) -> ScoreCard {
    let mut correct = 0u32;
    let mut wrong = 0u32;

    for question in questions {
        match answers.get(&question.id) {
            Some(&selection) if question.is_correct(selection) => correct += 1,
            Some(_) => wrong += 1,
            None => {}
        }
    }

    let total = questions.len() as u32;
    let attempted = correct + wrong;
    let hundredths = paper.marking().net_hundredths(correct, wrong);

    ScoreCard {
        total,
        correct,
        wrong,
        skipped: total - attempted,
        attempted,
        score: hundredths as f64 / 100.0,
    }
}

/// `round(part / whole * 100)` with halves rounded up, or 0 when `whole` is 0.
///
/// Integer arithmetic keeps e.g. 1/8 = 12.5% from landing on the wrong side
/// of the half.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u32
}
