//! Quiz configuration, question selection, and the in-progress attempt.
//!
//! A [`QuizSession`] holds everything the quiz screen tracks while the user
//! works through questions: selections, per-question time, bookmarks and
//! struck-out options. Submitting it produces the immutable [`QuizResult`]
//! plus the wrong answers destined for the mistake bank.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{AnsweredQuestion, Answers, Paper, Question, QuestionId, QuizResult};
use crate::scoring::score_quiz;

/// Subject filter value that matches every subject.
pub const MIX_SUBJECT: &str = "Mix";

/// Topic filter value that matches every topic.
pub const ALL_TOPICS: &str = "All Topics";

/// Default number of questions per quiz.
pub const DEFAULT_COUNT: usize = 10;

/// Seconds allowed per question when no explicit limit is set.
pub fn seconds_per_question(paper: Paper) -> u64 {
    match paper {
        Paper::Gs1 => 72,
        Paper::Csat => 90,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Count-down timer, answers revealed only after submission.
    #[default]
    Test,
    /// Count-up timer, each answer is checked and locked immediately.
    Learning,
}

/// Shortcut quizzes launched from the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickType {
    Random,
    Mistakes,
}

/// Parameters for building a quiz. Persisted under `quiz_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizConfig {
    pub mode: QuizMode,
    pub paper: Paper,
    pub subject: String,
    pub topic: String,
    pub count: usize,
    /// Total time limit in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_type: Option<QuickType>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mode: QuizMode::Test,
            paper: Paper::Gs1,
            subject: MIX_SUBJECT.to_string(),
            topic: ALL_TOPICS.to_string(),
            count: DEFAULT_COUNT,
            time_limit: None,
            quick_type: None,
        }
    }
}

impl QuizConfig {
    /// A ten-question quick quiz across all subjects of `paper`.
    pub fn quick(quick_type: QuickType, paper: Paper, mode: QuizMode) -> Self {
        Self {
            mode,
            paper,
            quick_type: Some(quick_type),
            ..Self::default()
        }
    }

    /// A full-length mock paper: 100 GS1 or 80 CSAT questions, two hours.
    pub fn mock(paper: Paper, mode: QuizMode) -> Self {
        Self {
            mode,
            paper,
            count: match paper {
                Paper::Gs1 => 100,
                Paper::Csat => 80,
            },
            time_limit: Some(2 * 60 * 60),
            ..Self::default()
        }
    }

    /// The configured limit, or a per-question allowance for the paper.
    pub fn effective_time_limit(&self) -> u64 {
        self.time_limit
            .unwrap_or_else(|| self.count as u64 * seconds_per_question(self.paper))
    }

    fn matches(&self, question: &Question) -> bool {
        question.paper == self.paper
            && (self.subject == MIX_SUBJECT
                || self.subject.is_empty()
                || question.subject == self.subject)
            && (self.topic == ALL_TOPICS || self.topic.is_empty() || question.topic == self.topic)
    }
}

/// Pick the questions for a new quiz.
///
/// Mistake-review quizzes draw from the mistake bank; everything else filters
/// `pool` by paper, subject and topic. The candidates are shuffled and the
/// first `count` taken.
pub fn select_questions<R: Rng + ?Sized>(
    config: &QuizConfig,
    pool: &[Question],
    mistakes: &[Question],
    rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
    let mut candidates: Vec<Question> = if config.quick_type == Some(QuickType::Mistakes) {
        if mistakes.is_empty() {
            return Err(QuizError::EmptyMistakeBank);
        }
        mistakes.to_vec()
    } else {
        pool.iter().filter(|q| config.matches(q)).cloned().collect()
    };

    candidates.shuffle(rng);
    candidates.truncate(config.count);

    if candidates.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    tracing::debug!(
        "selected {} questions (paper {}, subject {}, topic {})",
        candidates.len(),
        config.paper,
        config.subject,
        config.topic
    );
    Ok(candidates)
}

/// A quiz ready to be taken: its configuration and the chosen questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedQuiz {
    pub config: QuizConfig,
    pub questions: Vec<Question>,
}

/// Autosave snapshot of an attempt. Persisted under `quiz_progress`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizProgress {
    pub answers: Answers,
    pub current_idx: usize,
    /// Seconds spent per question.
    pub time_spent: BTreeMap<QuestionId, u64>,
}

/// Output of [`QuizSession::submit`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub result: QuizResult,
    /// Questions answered incorrectly, in quiz order.
    pub mistakes: Vec<Question>,
}

/// An attempt in progress.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: QuizConfig,
    questions: Vec<Question>,
    answers: Answers,
    time_spent: BTreeMap<QuestionId, u64>,
    bookmarks: Vec<QuestionId>,
    eliminated: BTreeMap<QuestionId, BTreeSet<usize>>,
    current_idx: usize,
}

impl QuizSession {
    pub fn new(config: QuizConfig, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            config,
            questions,
            answers: Answers::new(),
            time_spent: BTreeMap::new(),
            bookmarks: Vec::new(),
            eliminated: BTreeMap::new(),
            current_idx: 0,
        })
    }

    /// Rebuild a session from an autosave snapshot.
    ///
    /// Answers and timings for ids outside the quiz are dropped. A recorded
    /// selection is kept even when it names no option, so it scores as wrong.
    pub fn resume(
        config: QuizConfig,
        questions: Vec<Question>,
        progress: QuizProgress,
    ) -> Result<Self, QuizError> {
        let mut session = Self::new(config, questions)?;
        for question in &session.questions {
            if let Some(&sel) = progress.answers.get(&question.id) {
                if sel >= question.options.len() {
                    tracing::warn!(
                        "answer {sel} for question {} is not one of its {} options",
                        question.id,
                        question.options.len()
                    );
                }
                session.answers.insert(question.id.clone(), sel);
            }
            if let Some(&secs) = progress.time_spent.get(&question.id) {
                session.time_spent.insert(question.id.clone(), secs);
            }
        }
        session.current_idx = progress.current_idx.min(session.questions.len() - 1);
        Ok(session)
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_idx
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.current_idx]
    }

    pub fn is_last(&self) -> bool {
        self.current_idx + 1 == self.questions.len()
    }

    pub fn selection(&self) -> Option<usize> {
        self.answers.get(&self.current().id).copied()
    }

    /// Learning mode reveals the explanation once a question is answered.
    pub fn explanation_visible(&self) -> bool {
        self.config.mode == QuizMode::Learning && self.selection().is_some()
    }

    /// Select an option on the current question, or clear it if it is
    /// already selected. Returns whether the option is now selected.
    pub fn select_option(&mut self, option: usize) -> Result<bool, QuizError> {
        let question = &self.questions[self.current_idx];
        let id = question.id.clone();
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                id,
                option,
                available: question.options.len(),
            });
        }
        if self.config.mode == QuizMode::Learning && self.answers.contains_key(&id) {
            return Err(QuizError::AnswerLocked(id));
        }
        if self.eliminated.get(&id).is_some_and(|set| set.contains(&option)) {
            return Err(QuizError::OptionEliminated { id, option });
        }

        if self.answers.get(&id) == Some(&option) {
            self.answers.remove(&id);
            Ok(false)
        } else {
            self.answers.insert(id, option);
            Ok(true)
        }
    }

    /// Strike out or restore an option. Returns whether it is now struck out.
    pub fn toggle_eliminated(&mut self, option: usize) -> Result<bool, QuizError> {
        let question = &self.questions[self.current_idx];
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                id: question.id.clone(),
                option,
                available: question.options.len(),
            });
        }
        let set = self.eliminated.entry(question.id.clone()).or_default();
        if set.remove(&option) {
            Ok(false)
        } else {
            set.insert(option);
            Ok(true)
        }
    }

    pub fn is_eliminated(&self, option: usize) -> bool {
        self.eliminated
            .get(&self.current().id)
            .is_some_and(|set| set.contains(&option))
    }

    /// Returns whether the current question is now bookmarked.
    pub fn toggle_bookmark(&mut self) -> bool {
        let id = self.current().id.clone();
        if let Some(pos) = self.bookmarks.iter().position(|b| *b == id) {
            self.bookmarks.remove(pos);
            false
        } else {
            self.bookmarks.push(id);
            true
        }
    }

    pub fn bookmarks(&self) -> &[QuestionId] {
        &self.bookmarks
    }

    /// Advance; returns `false` on the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_idx += 1;
        true
    }

    /// Go back; returns `false` on the first question.
    pub fn prev(&mut self) -> bool {
        if self.current_idx == 0 {
            return false;
        }
        self.current_idx -= 1;
        true
    }

    pub fn goto(&mut self, index: usize) -> Result<(), QuizError> {
        if index >= self.questions.len() {
            return Err(QuizError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current_idx = index;
        Ok(())
    }

    /// Add time spent on the current question.
    pub fn record_time(&mut self, seconds: u64) {
        let id = self.current().id.clone();
        *self.time_spent.entry(id).or_default() += seconds;
    }

    pub fn total_time(&self) -> u64 {
        self.time_spent.values().sum()
    }

    /// Seconds left on the count-down, or `None` in learning mode.
    pub fn time_remaining(&self, elapsed: u64) -> Option<u64> {
        (self.config.mode == QuizMode::Test)
            .then(|| self.config.effective_time_limit().saturating_sub(elapsed))
    }

    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            answers: self.answers.clone(),
            current_idx: self.current_idx,
            time_spent: self.time_spent.clone(),
        }
    }

    /// Score the attempt and build its result.
    pub fn submit(self, now: DateTime<Utc>) -> Submission {
        let card = score_quiz(&self.questions, &self.answers, self.config.paper);
        let time_spent = self.total_time();

        let mistakes: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id)
                    .is_some_and(|&sel| !q.is_correct(sel))
            })
            .cloned()
            .collect();

        let quiz = self
            .questions
            .into_iter()
            .map(|question| {
                let user_sel = self.answers.get(&question.id).copied();
                AnsweredQuestion { question, user_sel }
            })
            .collect();

        let subject = Some(self.config.subject).filter(|s| !s.is_empty());

        let result = QuizResult {
            id: Uuid::new_v4(),
            score: card.score,
            total: card.total,
            correct: card.correct,
            wrong: card.wrong,
            skipped: card.skipped,
            attempted: card.attempted,
            subject,
            paper: self.config.paper,
            accuracy: card.accuracy(),
            time_spent,
            quiz,
            timestamp: now,
            synced: false,
        };

        Submission { result, mistakes }
    }
}

/// Render seconds as a zero-padded `MM:SS` clock.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
