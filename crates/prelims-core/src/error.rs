//! Quiz error types.
//!
//! These are the recoverable failures a quiz session can report back to its
//! caller. None of them is fatal: the worst case is asking the user to pick
//! a different configuration.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised while building or driving a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The requested selection produced zero questions.
    #[error("no questions found for this selection")]
    NoQuestions,

    /// Mistake-review mode was requested but nothing has been missed yet.
    #[error("no mistakes saved yet")]
    EmptyMistakeBank,

    /// The option index does not exist on the question.
    #[error("option {option} is out of range for question {id} ({available} options)")]
    OptionOutOfRange {
        id: QuestionId,
        option: usize,
        available: usize,
    },

    /// The option was struck out and cannot be selected.
    #[error("option {option} of question {id} has been eliminated")]
    OptionEliminated { id: QuestionId, option: usize },

    /// Learning mode locks a question once it has been answered.
    #[error("question {0} is already answered")]
    AnswerLocked(QuestionId),

    /// Navigation outside the quiz.
    #[error("question index {index} is out of range (quiz has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl QuizError {
    /// Returns `true` if the user should go back and reconfigure the quiz.
    pub fn needs_reconfiguration(&self) -> bool {
        matches!(self, QuizError::NoQuestions | QuizError::EmptyMistakeBank)
    }
}
