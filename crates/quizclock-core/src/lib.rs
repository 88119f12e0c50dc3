//! quizclock-core — Timed quiz engine.
//!
//! This crate runs a round of questions against an interactive input source,
//! racing each answer against a per-question timeout or a single round-wide
//! timer, and tallies the score.

pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod question;
pub mod score;
pub mod timing;

pub use engine::{NoopReporter, QuizReporter, RoundDriver};
pub use error::QuizError;
pub use model::{AnswerOutcome, Question, Quiz, RoundResult, TerminationReason, TimingConfig};
