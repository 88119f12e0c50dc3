//! Quiz error types.
//!
//! Only configuration and loading problems are errors. Wrong answers,
//! unparseable answers and expired timers are ordinary outcomes and are
//! reported through [`crate::model::AnswerOutcome`] and
//! [`crate::model::RoundResult`] instead.

use thiserror::Error;

/// Errors that prevent a round from starting.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The timing parameters or question set cannot produce a round.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A record in a quiz file could not be turned into a question.
    #[error("parse error at record {record}: {message}")]
    Parse { record: usize, message: String },

    /// The quiz file extension is not one we know how to read.
    #[error("unsupported quiz format: {0}")]
    UnsupportedFormat(String),
}

impl QuizError {
    /// Returns `true` if this error comes from bad timing or an empty quiz.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QuizError::InvalidConfiguration(_))
    }
}
