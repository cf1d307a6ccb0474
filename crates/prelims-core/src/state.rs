//! Application state: every persisted read and write goes through here.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::export::BackupDocument;
use crate::history::{merge_mistakes, push_newest, DEFAULT_HISTORY_CAP, DEFAULT_MISTAKE_CAP};
use crate::model::{Question, QuizResult};
use crate::session::{QuizConfig, QuizProgress, Submission};
use crate::statistics::{
    classify_subjects, compute_lifetime_stats, ActivityStreak, LifetimeStats, SwotSummary,
    DEFAULT_TREND_WINDOW,
};
use crate::store::{keys, load, load_or_default, save, KeyValueStore};

/// Caps and windows applied when writing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// `None` keeps every attempt.
    pub history_cap: Option<usize>,
    pub mistake_cap: usize,
    pub trend_window: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            history_cap: Some(DEFAULT_HISTORY_CAP),
            mistake_cap: DEFAULT_MISTAKE_CAP,
            trend_window: DEFAULT_TREND_WINDOW,
        }
    }
}

/// Colour theme preference.
pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";

/// Local application state backed by a key-value store.
pub struct AppState {
    store: Box<dyn KeyValueStore>,
    limits: Limits,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore>, limits: Limits) -> Self {
        Self { store, limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // -- history ------------------------------------------------------------

    /// Newest-first attempt history.
    pub fn history(&self) -> Vec<QuizResult> {
        load_or_default(self.store(), keys::HISTORY)
    }

    pub fn append_result(&self, result: QuizResult) -> Result<()> {
        let mut history = self.history();
        push_newest(&mut history, result, self.limits.history_cap);
        save(self.store(), keys::HISTORY, &history)
    }

    pub fn last_result(&self) -> Option<QuizResult> {
        load(self.store(), keys::LAST_RESULT)
    }

    // -- mistakes -----------------------------------------------------------

    /// Mistake bank, oldest first.
    pub fn mistakes(&self) -> Vec<Question> {
        load_or_default(self.store(), keys::MISTAKES)
    }

    /// Returns how many new questions entered the bank.
    pub fn record_mistakes(&self, wrong: &[Question]) -> Result<usize> {
        let mut bank = self.mistakes();
        let inserted = merge_mistakes(&mut bank, wrong, self.limits.mistake_cap);
        save(self.store(), keys::MISTAKES, &bank)?;
        Ok(inserted)
    }

    // -- submission ---------------------------------------------------------

    /// Persist a submitted attempt: mistakes, history, the last result and the
    /// activity streak. Clears the autosaved progress.
    pub fn record_submission(&self, submission: &Submission) -> Result<()> {
        let inserted = self.record_mistakes(&submission.mistakes)?;
        self.append_result(submission.result.clone())?;
        save(self.store(), keys::LAST_RESULT, &submission.result)?;
        self.store.remove(keys::QUIZ_PROGRESS)?;
        self.touch_streak(submission.result.timestamp)?;

        tracing::info!(
            "recorded attempt {} (score {:.2}, {} new mistakes)",
            submission.result.id,
            submission.result.score,
            inserted
        );
        Ok(())
    }

    // -- stats --------------------------------------------------------------

    pub fn stats(&self) -> LifetimeStats {
        compute_lifetime_stats(&self.history(), self.limits.trend_window)
    }

    pub fn swot(&self) -> SwotSummary {
        classify_subjects(&self.stats().subjects)
    }

    pub fn streak(&self) -> ActivityStreak {
        ActivityStreak {
            days: load_or_default(self.store(), keys::STREAK),
            last_active: load(self.store(), keys::LAST_ACTIVE_DATE),
        }
    }

    fn touch_streak(&self, at: DateTime<Utc>) -> Result<()> {
        let mut streak = self.streak();
        let today: NaiveDate = at.date_naive();
        if streak.record(today) {
            save(self.store(), keys::STREAK, &streak.days)?;
            save(self.store(), keys::LAST_ACTIVE_DATE, &today)?;
        }
        Ok(())
    }

    // -- quiz config and autosave -------------------------------------------

    pub fn quiz_config(&self) -> Option<QuizConfig> {
        load(self.store(), keys::QUIZ_CONFIG)
    }

    pub fn save_quiz_config(&self, config: &QuizConfig) -> Result<()> {
        save(self.store(), keys::QUIZ_CONFIG, config)
    }

    pub fn progress(&self) -> Option<QuizProgress> {
        load(self.store(), keys::QUIZ_PROGRESS)
    }

    pub fn save_progress(&self, progress: &QuizProgress) -> Result<()> {
        save(self.store(), keys::QUIZ_PROGRESS, progress)
    }

    pub fn clear_progress(&self) -> Result<()> {
        self.store.remove(keys::QUIZ_PROGRESS)
    }

    // -- settings -----------------------------------------------------------

    pub fn theme(&self) -> String {
        load(self.store(), keys::THEME).unwrap_or_else(|| THEME_LIGHT.to_string())
    }

    pub fn set_theme(&self, theme: &str) -> Result<()> {
        save(self.store(), keys::THEME, theme)
    }

    pub fn disclaimer_accepted(&self) -> bool {
        load_or_default(self.store(), keys::DISCLAIMER_ACCEPTED)
    }

    pub fn accept_disclaimer(&self) -> Result<()> {
        save(self.store(), keys::DISCLAIMER_ACCEPTED, &true)
    }

    /// Delete history and the last result. Mistakes and settings survive.
    pub fn clear_history(&self) -> Result<()> {
        self.store.remove(keys::HISTORY)?;
        self.store.remove(keys::LAST_RESULT)?;
        tracing::info!("history cleared");
        Ok(())
    }

    /// Wipe every key.
    pub fn factory_reset(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("all local data cleared");
        Ok(())
    }

    pub fn export(&self, now: DateTime<Utc>) -> BackupDocument {
        BackupDocument::new(now, self.history(), self.mistakes())
    }
}
