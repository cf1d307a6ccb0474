//! Post-attempt review of a single result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AnsweredQuestion, QuizResult};
use crate::scoring::percent;
use crate::statistics::SubjectTally;

/// Subject label for questions recorded without one.
pub const GENERAL_SUBJECT: &str = "Gen";

/// Maximum marks shown on the scorecard for either paper.
pub const MAX_MARKS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerStatus {
    Correct,
    Wrong,
    Skipped,
}

impl AnswerStatus {
    pub fn of(answered: &AnsweredQuestion) -> Self {
        match answered.user_sel {
            None => AnswerStatus::Skipped,
            Some(sel) if answered.question.is_correct(sel) => AnswerStatus::Correct,
            Some(_) => AnswerStatus::Wrong,
        }
    }
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerStatus::Correct => write!(f, "Correct"),
            AnswerStatus::Wrong => write!(f, "Wrong"),
            AnswerStatus::Skipped => write!(f, "Skipped"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    /// Only questions answered and missed.
    Wrong,
}

/// Questions of a result matching `filter`, in quiz order.
pub fn review(result: &QuizResult, filter: ReviewFilter) -> Vec<(AnswerStatus, &AnsweredQuestion)> {
    result
        .quiz
        .iter()
        .map(|q| (AnswerStatus::of(q), q))
        .filter(|(status, _)| filter == ReviewFilter::All || *status == AnswerStatus::Wrong)
        .collect()
}

/// Questions and correct answers per subject within one attempt.
///
/// Skipped questions count towards the subject total.
pub fn subject_breakdown(result: &QuizResult) -> BTreeMap<String, SubjectTally> {
    let mut breakdown: BTreeMap<String, SubjectTally> = BTreeMap::new();
    for answered in &result.quiz {
        let subject = match answered.question.subject.as_str() {
            "" => GENERAL_SUBJECT,
            s => s,
        };
        let tally = breakdown.entry(subject.to_string()).or_default();
        tally.questions_attempted += 1;
        if AnswerStatus::of(answered) == AnswerStatus::Correct {
            tally.correct_count += 1;
        }
    }
    breakdown
}

/// Per-subject accuracy percentages, for the subject bar chart.
pub fn subject_accuracy(result: &QuizResult) -> Vec<(String, u32)> {
    subject_breakdown(result)
        .into_iter()
        .map(|(subject, tally)| {
            let accuracy = percent(tally.correct_count, tally.questions_attempted);
            (subject, accuracy)
        })
        .collect()
}

/// Mean seconds per question, rounded.
pub fn average_seconds(result: &QuizResult) -> u64 {
    if result.total == 0 {
        return 0;
    }
    let total = result.total as u64;
    (2 * result.time_spent + total) / (2 * total)
}

/// Render seconds as `Ys` under a minute, `Xm Ys` otherwise.
pub fn format_duration(seconds: u64) -> String {
    let (m, s) = (seconds / 60, seconds % 60);
    if m == 0 {
        format!("{s}s")
    } else {
        format!("{m}m {s}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{answered, result_with};

    fn sample() -> QuizResult {
        // fixtures::question puts the answer key at option 0.
        QuizResult {
            quiz: vec![
                answered("1", "Economy", Some(0)),
                answered("2", "Economy", Some(2)),
                answered("3", "", None),
                answered("4", "History", Some(0)),
            ],
            time_spent: 130,
            ..result_with(Some("Mix"), 4, 2, 1)
        }
    }

    #[test]
    fn statuses_follow_user_selection() {
        let result = sample();
        let statuses: Vec<_> = review(&result, ReviewFilter::All)
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(
            statuses,
            vec![
                AnswerStatus::Correct,
                AnswerStatus::Wrong,
                AnswerStatus::Skipped,
                AnswerStatus::Correct
            ]
        );
    }

    #[test]
    fn wrong_filter_excludes_skipped() {
        let result = sample();
        let wrong = review(&result, ReviewFilter::Wrong);
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].1.question.id.as_str(), "2");
    }

    #[test]
    fn breakdown_groups_blank_subject_as_gen() {
        let breakdown = subject_breakdown(&sample());
        assert_eq!(breakdown["Economy"].questions_attempted, 2);
        assert_eq!(breakdown["Economy"].correct_count, 1);
        assert_eq!(breakdown[GENERAL_SUBJECT].questions_attempted, 1);

        let accuracy = subject_accuracy(&sample());
        assert!(accuracy.contains(&("History".to_string(), 100)));
        assert!(accuracy.contains(&("Economy".to_string(), 50)));
    }

    #[test]
    fn average_time_rounds() {
        assert_eq!(average_seconds(&sample()), 33);
        assert_eq!(average_seconds(&QuizResult::default()), 0);
    }

    #[test]
    fn duration_format() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(130), "2m 10s");
    }
}
