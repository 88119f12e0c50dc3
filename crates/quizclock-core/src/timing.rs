//! Deadline policy for rounds.

use std::time::Duration;

use crate::error::QuizError;
use crate::model::{RoundMode, TimingConfig};

/// Shortest window a single question may be given when the budget is split.
pub const MIN_QUESTION_TIMEOUT: Duration = Duration::from_secs(2);

/// Split `total_budget` evenly across `question_count` questions.
///
/// Never returns less than [`MIN_QUESTION_TIMEOUT`].
pub fn per_question_timeout(
    total_budget: Duration,
    question_count: usize,
) -> Result<Duration, QuizError> {
    if question_count == 0 {
        return Err(QuizError::InvalidConfiguration(
            "cannot split a time budget across zero questions".into(),
        ));
    }
    let count = u32::try_from(question_count).unwrap_or(u32::MAX);
    Ok((total_budget / count).max(MIN_QUESTION_TIMEOUT))
}

/// Resolve how a round over `question_count` questions is timed.
///
/// The per-question timeout is computed once from the full count and is not
/// re-budgeted as the round progresses.
pub fn resolve_mode(config: &TimingConfig, question_count: usize) -> Result<RoundMode, QuizError> {
    config.validate()?;
    if question_count == 0 {
        return Err(QuizError::InvalidConfiguration("quiz has no questions".into()));
    }

    if config.split_evenly {
        let timeout = per_question_timeout(config.total_budget, question_count)?;
        Ok(RoundMode::PerQuestion { timeout })
    } else {
        Ok(RoundMode::GlobalTimer {
            budget: config.total_budget,
        })
    }
}
