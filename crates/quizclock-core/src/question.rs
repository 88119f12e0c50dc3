//! Asking a single question against a deadline.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::QuizReporter;
use crate::input::InputHandle;
use crate::model::{AnswerOutcome, Question};

/// Races each question's answer against a fixed per-question timeout.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRunner {
    timeout: Duration,
}

impl QuestionRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Show question `number` and wait for its answer or its timer.
    ///
    /// Whichever resolves first decides the outcome. When the timer wins the
    /// pending input request is abandoned, so an answer typed afterwards is
    /// discarded rather than handed to the next question. If the input has
    /// already closed the question can only time out.
    ///
    /// Returns `None` without reporting an outcome when `cancel` fires first.
    pub async fn evaluate(
        &self,
        number: usize,
        question: &Question,
        input: &mut InputHandle,
        reporter: &dyn QuizReporter,
        cancel: &CancellationToken,
    ) -> Option<AnswerOutcome> {
        reporter.on_question(number, &question.prompt);

        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let outcome = tokio::select! {
            () = cancel.cancelled() => None,
            line = input.next_line() => match line {
                Some(raw) => Some(classify(number, question, &raw)),
                // Input closed, so nothing can arrive before the timer.
                None => tokio::select! {
                    () = cancel.cancelled() => None,
                    () = &mut deadline => Some(AnswerOutcome::TimedOut),
                },
            },
            () = &mut deadline => Some(AnswerOutcome::TimedOut),
        };

        match outcome {
            Some(outcome) => {
                if outcome == AnswerOutcome::TimedOut {
                    tracing::debug!(question = number, timeout = ?self.timeout, "question timed out");
                }
                reporter.on_outcome(number, outcome);
            }
            None => tracing::debug!(question = number, "round cancelled mid-question"),
        }
        outcome
    }
}

/// Classify a raw answer line, logging answers that are not integers.
pub(crate) fn classify(number: usize, question: &Question, raw: &str) -> AnswerOutcome {
    let outcome = AnswerOutcome::classify(raw, question.answer);
    match outcome {
        AnswerOutcome::Unparseable => {
            tracing::debug!(question = number, input = %raw, "answer is not an integer");
        }
        _ => tracing::debug!(question = number, %outcome, "question answered"),
    }
    outcome
}
