//! Lifetime statistics derived from attempt history.
//!
//! Everything here is a pure read-side projection: nothing is stored, the
//! numbers are recomputed from history whenever they are needed.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::QuizResult;
use crate::scoring::percent;

/// Subject label for results recorded without one.
pub const MIXED_SUBJECT: &str = "Mixed";

/// Number of recent attempts plotted on the accuracy trend.
pub const DEFAULT_TREND_WINDOW: usize = 10;

/// Minimum questions answered before a subject is classified.
pub const MIN_SAMPLE: u32 = 5;

/// Question pool assumed when the loaded banks report no total.
pub const FALLBACK_AVAILABLE: u32 = 2000;

/// Rough per-subject pool used for subject progress.
pub const SUBJECT_POOL_ESTIMATE: u32 = 200;

/// Running totals for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTally {
    pub questions_attempted: u32,
    pub correct_count: u32,
}

impl SubjectTally {
    pub fn accuracy(&self) -> u32 {
        percent(self.correct_count, self.questions_attempted)
    }

    /// Compare by exact accuracy ratio, higher first.
    fn cmp_accuracy_desc(&self, other: &Self) -> Ordering {
        let lhs = self.correct_count as u64 * other.questions_attempted.max(1) as u64;
        let rhs = other.correct_count as u64 * self.questions_attempted.max(1) as u64;
        rhs.cmp(&lhs)
    }
}

/// Aggregate statistics over the whole history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    pub total_questions: u32,
    /// Integer percentage of all questions answered correctly.
    pub accuracy: u32,
    /// Total time spent, rounded to whole minutes.
    pub study_minutes: u64,
    pub subjects: BTreeMap<String, SubjectTally>,
    /// Accuracy of recent attempts, oldest first.
    pub accuracy_trend: Vec<u32>,
}

/// Compute lifetime statistics from a newest-first history.
pub fn compute_lifetime_stats(history: &[QuizResult], trend_window: usize) -> LifetimeStats {
    let mut total_questions = 0u32;
    let mut total_correct = 0u32;
    let mut total_seconds = 0u64;
    let mut subjects: BTreeMap<String, SubjectTally> = BTreeMap::new();

    for result in history {
        // Persisted totals are untrusted; saturate rather than overflow.
        total_questions = total_questions.saturating_add(result.total);
        total_correct = total_correct.saturating_add(result.correct);
        total_seconds = total_seconds.saturating_add(result.time_spent);

        let tally = subjects.entry(subject_label(result).to_string()).or_default();
        tally.questions_attempted = tally.questions_attempted.saturating_add(result.total);
        tally.correct_count = tally.correct_count.saturating_add(result.correct);
    }

    let accuracy_trend = history
        .iter()
        .take(trend_window)
        .map(|r| percent(r.correct, r.correct.saturating_add(r.wrong)))
        .rev()
        .collect();

    LifetimeStats {
        total_questions,
        accuracy: percent(total_correct, total_questions),
        study_minutes: total_seconds.saturating_add(30) / 60,
        subjects,
        accuracy_trend,
    }
}

fn subject_label(result: &QuizResult) -> &str {
    match result.subject.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => MIXED_SUBJECT,
    }
}

/// Render minutes as `Hh Mm`.
pub fn format_study_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Subjects sorted by accuracy, best first. Ties keep alphabetical order.
pub fn ranked_subjects(subjects: &BTreeMap<String, SubjectTally>) -> Vec<(&str, SubjectTally)> {
    let mut ranked: Vec<_> = subjects.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| a.1.cmp_accuracy_desc(&b.1));
    ranked
}

// ---------------------------------------------------------------------------
// Strength / weakness classification
// ---------------------------------------------------------------------------

/// Accuracy band of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Strong,
    Moderate,
    Weak,
}

impl Standing {
    /// Band for an integer accuracy: above 65 is strong, 40 to 65 moderate.
    pub fn from_accuracy(accuracy: u32) -> Self {
        if accuracy > 65 {
            Standing::Strong
        } else if accuracy >= 40 {
            Standing::Moderate
        } else {
            Standing::Weak
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Strong => write!(f, "strong"),
            Standing::Moderate => write!(f, "moderate"),
            Standing::Weak => write!(f, "weak"),
        }
    }
}

/// Classify one subject, or `None` if it has too few questions.
pub fn classify_subject(tally: &SubjectTally) -> Option<Standing> {
    (tally.questions_attempted >= MIN_SAMPLE).then(|| Standing::from_accuracy(tally.accuracy()))
}

/// Subjects grouped by standing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwotSummary {
    pub strong: Vec<String>,
    pub moderate: Vec<String>,
    pub weak: Vec<String>,
}

impl SwotSummary {
    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.moderate.is_empty() && self.weak.is_empty()
    }
}

pub fn classify_subjects(subjects: &BTreeMap<String, SubjectTally>) -> SwotSummary {
    let mut summary = SwotSummary::default();
    for (name, tally) in subjects {
        let bucket = match classify_subject(tally) {
            Some(Standing::Strong) => &mut summary.strong,
            Some(Standing::Moderate) => &mut summary.moderate,
            Some(Standing::Weak) => &mut summary.weak,
            None => continue,
        };
        bucket.push(name.clone());
    }
    summary
}

// ---------------------------------------------------------------------------
// Dashboard progress
// ---------------------------------------------------------------------------

/// How much of a question pool has been covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusProgress {
    pub attempted: u32,
    pub available: u32,
    /// Capped at 100.
    pub percent: u32,
}

impl SyllabusProgress {
    pub fn new(attempted: u32, available: u32) -> Self {
        let available = if available == 0 {
            FALLBACK_AVAILABLE
        } else {
            available
        };
        Self {
            attempted,
            available,
            percent: percent(attempted, available).min(100),
        }
    }
}

/// Total questions attempted across all results.
pub fn syllabus_progress(history: &[QuizResult], available: u32) -> SyllabusProgress {
    let attempted = history
        .iter()
        .fold(0u32, |sum, r| sum.saturating_add(r.total));
    SyllabusProgress::new(attempted, available)
}

/// Questions attempted in quizzes configured for `subject`.
pub fn subject_attempts(history: &[QuizResult], subject: &str) -> u32 {
    history
        .iter()
        .filter(|r| r.subject.as_deref() == Some(subject))
        .fold(0u32, |sum, r| sum.saturating_add(r.total))
}

pub fn subject_progress(history: &[QuizResult], subject: &str) -> SyllabusProgress {
    SyllabusProgress::new(subject_attempts(history, subject), SUBJECT_POOL_ESTIMATE)
}

// ---------------------------------------------------------------------------
// Activity streak
// ---------------------------------------------------------------------------

/// Count of distinct days on which an attempt was recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStreak {
    pub days: u32,
    pub last_active: Option<NaiveDate>,
}

impl ActivityStreak {
    /// Record activity on `today`. Returns `true` if the streak advanced.
    pub fn record(&mut self, today: NaiveDate) -> bool {
        if self.last_active == Some(today) {
            return false;
        }
        self.days = self.days.saturating_add(1);
        self.last_active = Some(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::result_with;

    #[test]
    fn lifetime_stats_sum_history() {
        let history = vec![
            result_with(Some("Indian Polity"), 10, 7, 2),
            result_with(Some("Indian Polity"), 10, 5, 5),
            result_with(None, 20, 10, 4),
        ];
        let stats = compute_lifetime_stats(&history, DEFAULT_TREND_WINDOW);

        assert_eq!(stats.total_questions, 40);
        assert_eq!(stats.accuracy, 55);
        assert_eq!(
            stats.subjects["Indian Polity"],
            SubjectTally {
                questions_attempted: 20,
                correct_count: 12
            }
        );
        assert_eq!(stats.subjects[MIXED_SUBJECT].questions_attempted, 20);
        // Chronological order: oldest (last in history) first.
        assert_eq!(stats.accuracy_trend, vec![71, 50, 78]);
    }

    #[test]
    fn study_minutes_round_to_nearest() {
        let mut a = result_with(None, 5, 5, 0);
        a.time_spent = 89;
        let mut b = result_with(None, 5, 5, 0);
        b.time_spent = 1;
        let stats = compute_lifetime_stats(&[a, b], DEFAULT_TREND_WINDOW);
        assert_eq!(stats.study_minutes, 2);

        let mut c = result_with(None, 5, 5, 0);
        c.time_spent = 29;
        assert_eq!(compute_lifetime_stats(&[c], 10).study_minutes, 0);
    }

    #[test]
    fn trend_uses_the_most_recent_window() {
        let history: Vec<_> = (0..15u32).map(|i| result_with(None, 10, 10 - i.min(10), 0)).collect();
        let stats = compute_lifetime_stats(&history, 10);
        assert_eq!(stats.accuracy_trend.len(), 10);
        // history[0] is newest, so it is plotted last.
        assert_eq!(*stats.accuracy_trend.last().unwrap(), 100);
    }

    #[test]
    fn trend_skips_unattempted_results() {
        let history = vec![result_with(None, 10, 0, 0)];
        assert_eq!(compute_lifetime_stats(&history, 10).accuracy_trend, vec![0]);
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = compute_lifetime_stats(&[], DEFAULT_TREND_WINDOW);
        assert_eq!(stats, LifetimeStats::default());
    }

    #[test]
    fn oversized_totals_saturate() {
        let mut huge = result_with(Some("Economy"), 3_000_000_000, 3_000_000_000, 0);
        huge.wrong = u32::MAX;
        huge.time_spent = u64::MAX;
        let history = vec![huge.clone(), huge];

        let stats = compute_lifetime_stats(&history, DEFAULT_TREND_WINDOW);
        assert_eq!(stats.total_questions, u32::MAX);
        assert_eq!(stats.subjects["Economy"].questions_attempted, u32::MAX);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.accuracy_trend.len(), 2);
        assert_eq!(stats.study_minutes, u64::MAX / 60);
        assert_eq!(syllabus_progress(&history, 0).attempted, u32::MAX);
        assert_eq!(subject_attempts(&history, "Economy"), u32::MAX);
    }

    #[test]
    fn swot_thresholds() {
        let subjects: BTreeMap<String, SubjectTally> = [
            ("Economy", 5, 4),       // 80%
            ("Geography", 10, 4),    // 40%
            ("History", 10, 3),      // 30%
            ("Environment", 3, 3),   // too few
            ("Art & Culture", 4, 4), // one short of the minimum
            ("Polity", 20, 13),      // 65%
        ]
        .into_iter()
        .map(|(name, qs, correct)| {
            (
                name.to_string(),
                SubjectTally {
                    questions_attempted: qs,
                    correct_count: correct,
                },
            )
        })
        .collect();

        let swot = classify_subjects(&subjects);
        assert_eq!(swot.strong, vec!["Economy"]);
        assert_eq!(swot.moderate, vec!["Geography", "Polity"]);
        assert_eq!(swot.weak, vec!["History"]);
        assert_eq!(classify_subject(&subjects["Art & Culture"]), None);
    }

    #[test]
    fn ranking_sorts_by_accuracy() {
        let stats = compute_lifetime_stats(
            &[
                result_with(Some("A"), 10, 3, 0),
                result_with(Some("B"), 10, 9, 0),
                result_with(Some("C"), 3, 2, 0),
            ],
            10,
        );
        let names: Vec<_> = ranked_subjects(&stats.subjects)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn study_time_format() {
        assert_eq!(format_study_time(0), "0h 0m");
        assert_eq!(format_study_time(135), "2h 15m");
    }

    #[test]
    fn syllabus_progress_caps_and_falls_back() {
        let history = vec![result_with(None, 50, 10, 0)];
        let progress = syllabus_progress(&history, 0);
        assert_eq!(progress.available, FALLBACK_AVAILABLE);
        assert_eq!(progress.percent, 3);

        assert_eq!(syllabus_progress(&history, 40).percent, 100);
    }

    #[test]
    fn subject_progress_counts_only_that_subject() {
        let history = vec![
            result_with(Some("Economy"), 20, 10, 0),
            result_with(Some("Economy"), 30, 10, 0),
            result_with(Some("History"), 10, 10, 0),
        ];
        assert_eq!(subject_attempts(&history, "Economy"), 50);
        assert_eq!(subject_progress(&history, "Economy").percent, 25);
    }

    #[test]
    fn streak_advances_once_per_day() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        let mut streak = ActivityStreak::default();
        assert!(streak.record(day(1)));
        assert!(!streak.record(day(1)));
        assert!(streak.record(day(4)));
        assert_eq!(streak.days, 2);
        assert_eq!(streak.last_active, Some(day(4)));
    }
}
