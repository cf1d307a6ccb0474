//! Capped attempt history and the deduplicated mistake bank.

use std::collections::HashSet;

use crate::model::{Question, QuizResult};

/// Default number of attempts kept in history.
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Default size of the mistake bank.
pub const DEFAULT_MISTAKE_CAP: usize = 100;

/// Insert `result` as the newest entry and drop the oldest ones beyond `cap`.
///
/// History is ordered newest-first. `None` keeps every attempt.
pub fn push_newest(history: &mut Vec<QuizResult>, result: QuizResult, cap: Option<usize>) {
    history.insert(0, result);
    if let Some(cap) = cap {
        history.truncate(cap);
    }
}

/// Append previously unseen questions to the bank, then keep the `cap` most
/// recent entries.
///
/// The bank is ordered oldest to newest. A question whose id is already in
/// the bank (or earlier in `wrong`) is skipped, so the first-seen copy wins.
/// Returns how many questions were inserted.
pub fn merge_mistakes(bank: &mut Vec<Question>, wrong: &[Question], cap: usize) -> usize {
    let mut seen: HashSet<_> = bank.iter().map(|q| q.id.clone()).collect();
    let mut inserted = 0;

    for question in wrong {
        if seen.insert(question.id.clone()) {
            bank.push(question.clone());
            inserted += 1;
        }
    }

    if bank.len() > cap {
        let excess = bank.len() - cap;
        bank.drain(..excess);
    }
    inserted
}
