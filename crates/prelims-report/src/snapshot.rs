//! The data a report renders, gathered once from application state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use prelims_core::model::QuizResult;
use prelims_core::state::AppState;
use prelims_core::statistics::{
    classify_subjects, compute_lifetime_stats, syllabus_progress, LifetimeStats, SwotSummary,
    SyllabusProgress,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub generated_at: DateTime<Utc>,
    pub stats: LifetimeStats,
    pub swot: SwotSummary,
    pub streak_days: u32,
    pub syllabus: SyllabusProgress,
    pub last_result: Option<QuizResult>,
}

impl StatsReport {
    /// Snapshot `state`. `available` is the size of the loaded question pool
    /// (0 when unknown).
    pub fn from_state(state: &AppState, available: u32, now: DateTime<Utc>) -> Self {
        let history = state.history();
        let stats = compute_lifetime_stats(&history, state.limits().trend_window);
        Self {
            generated_at: now,
            swot: classify_subjects(&stats.subjects),
            stats,
            streak_days: state.streak().days,
            syllabus: syllabus_progress(&history, available),
            last_result: state.last_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prelims_core::session::Submission;
    use prelims_core::state::Limits;
    use prelims_core::store::MemoryStore;

    #[test]
    fn snapshot_reads_state() {
        let state = AppState::new(Box::new(MemoryStore::new()), Limits::default());
        let result = QuizResult {
            total: 10,
            correct: 8,
            wrong: 2,
            attempted: 10,
            subject: Some("Environment".into()),
            timestamp: Utc::now(),
            ..Default::default()
        };
        state
            .record_submission(&Submission {
                result,
                mistakes: vec![],
            })
            .unwrap();

        let report = StatsReport::from_state(&state, 500, Utc::now());
        assert_eq!(report.stats.total_questions, 10);
        assert_eq!(report.swot.strong, vec!["Environment"]);
        assert_eq!(report.streak_days, 1);
        assert_eq!(report.syllabus.percent, 2);
        assert!(report.last_result.is_some());
    }
}
