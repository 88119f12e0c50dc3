//! Core data model types for quizclock.
//!
//! Questions and timing settings are built once per round and never change
//! while it runs. Outcomes are produced per question; a [`RoundResult`] is
//! produced once when the round ends.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player (e.g. "5+5").
    pub prompt: String,
    /// The integer the player must enter.
    pub answer: i64,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: i64) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
        }
    }
}

/// A named, ordered set of questions loaded from a quiz file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Human-readable name.
    pub name: String,
    /// Description of this quiz.
    #[serde(default)]
    pub description: String,
    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Timing parameters for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Time allowed for the whole round.
    pub total_budget: Duration,
    /// Split the budget evenly into per-question timeouts instead of
    /// running a single round-wide timer.
    pub split_evenly: bool,
}

impl TimingConfig {
    pub fn new(total_budget: Duration, split_evenly: bool) -> Self {
        Self {
            total_budget,
            split_evenly,
        }
    }

    /// Reject budgets that cannot time anything.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.total_budget.is_zero() {
            return Err(QuizError::InvalidConfiguration(
                "time budget must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            total_budget: Duration::from_secs(30),
            split_evenly: false,
        }
    }
}

/// How a round is timed, resolved from a [`TimingConfig`] and a question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// One deadline for the whole round; questions have no timeout of their own.
    GlobalTimer { budget: Duration },
    /// Every question gets the same fixed timeout; no round deadline.
    PerQuestion { timeout: Duration },
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundMode::GlobalTimer { budget } => {
                write!(f, "{}s to finish the full quiz", budget.as_secs_f64())
            }
            RoundMode::PerQuestion { timeout } => {
                write!(f, "{}s to solve each problem", timeout.as_secs_f64())
            }
        }
    }
}

/// Result of asking one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// No answer arrived before the question's timer fired.
    TimedOut,
    /// The answer was not an integer. Scored as incorrect.
    Unparseable,
}

impl AnswerOutcome {
    /// Classify a raw input line against the expected answer.
    pub fn classify(raw: &str, expected: i64) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) if n == expected => AnswerOutcome::Correct,
            Ok(_) => AnswerOutcome::Incorrect,
            Err(_) => AnswerOutcome::Unparseable,
        }
    }
}

impl fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerOutcome::Correct => write!(f, "correct"),
            AnswerOutcome::Incorrect => write!(f, "incorrect"),
            AnswerOutcome::TimedOut => write!(f, "timed out"),
            AnswerOutcome::Unparseable => write!(f, "unparseable"),
        }
    }
}

/// Why a round stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Every question was asked.
    Completed,
    /// The round-wide timer fired before the last question was answered.
    GlobalTimeout,
    /// The input source ended before the round could finish.
    InputClosed,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "completed"),
            TerminationReason::GlobalTimeout => write!(f, "time is up"),
            TerminationReason::InputClosed => write!(f, "input closed"),
        }
    }
}

/// Per-outcome tally for a finished round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub correct: usize,
    pub incorrect: usize,
    pub timed_out: usize,
    pub unparseable: usize,
}

impl OutcomeCounts {
    /// Number of questions that produced an outcome.
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect + self.timed_out + self.unparseable
    }
}

/// Final score of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub total_questions: usize,
    pub correct_count: usize,
    pub termination: TerminationReason,
    #[serde(default)]
    pub outcomes: OutcomeCounts,
}
