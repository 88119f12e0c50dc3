//! Round driver.
//!
//! Runs a full question sequence against the player's input, either under a
//! single round-wide timer or with a fixed timeout per question, and returns
//! the final score.

use std::time::Duration;

use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

use crate::error::QuizError;
use crate::input::{InputCollector, InputHandle};
use crate::model::{
    AnswerOutcome, Question, RoundMode, RoundResult, TerminationReason, TimingConfig,
};
use crate::question::{self, QuestionRunner};
use crate::score::ScoreAggregator;
use crate::timing;

/// Progress reporting trait.
///
/// The driver never prints; everything the player sees goes through here.
pub trait QuizReporter: Send + Sync {
    /// Waiting for the player to confirm the start. `attempt` starts at 1.
    fn on_awaiting_start(&self, mode: &RoundMode, attempt: u32);
    fn on_round_start(&self, mode: &RoundMode, question_count: usize);
    fn on_question(&self, number: usize, prompt: &str);
    fn on_outcome(&self, number: usize, outcome: AnswerOutcome);
    fn on_round_complete(&self, result: &RoundResult);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_awaiting_start(&self, _: &RoundMode, _: u32) {}
    fn on_round_start(&self, _: &RoundMode, _: usize) {}
    fn on_question(&self, _: usize, _: &str) {}
    fn on_outcome(&self, _: usize, _: AnswerOutcome) {}
    fn on_round_complete(&self, _: &RoundResult) {}
}

/// Drives one round at a time.
#[derive(Debug, Clone)]
pub struct RoundDriver {
    timing: TimingConfig,
    start_gate: bool,
    cancel: CancellationToken,
}

impl RoundDriver {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            start_gate: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Require the player to enter `Y` before any timer starts.
    pub fn with_start_gate(mut self, enabled: bool) -> Self {
        self.start_gate = enabled;
        self
    }

    /// End the round when `cancel` fires. Input collection stops and any
    /// question in flight is abandoned without an outcome; the round is
    /// reported as if the input had closed.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Run one round over `questions`, reading answers from `input`.
    ///
    /// Fails only when the configuration cannot produce a round; in that case
    /// no input is read.
    pub async fn run<R>(
        &self,
        questions: &[Question],
        input: R,
        reporter: &dyn QuizReporter,
    ) -> Result<RoundResult, QuizError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let mode = timing::resolve_mode(&self.timing, questions.len())?;

        let (collector, mut handle) = InputCollector::spawn(input, self.cancel.child_token());
        let mut score = ScoreAggregator::new(questions.len());

        let termination = if self.start_gate && !await_start(&mut handle, &mode, reporter).await {
            TerminationReason::InputClosed
        } else {
            tracing::info!(questions = questions.len(), %mode, "round started");
            reporter.on_round_start(&mode, questions.len());

            match mode {
                RoundMode::GlobalTimer { budget } => {
                    run_global(questions, budget, &mut handle, &mut score, reporter).await
                }
                RoundMode::PerQuestion { timeout } => {
                    let runner = QuestionRunner::new(timeout);
                    run_per_question(
                        questions,
                        &runner,
                        &mut handle,
                        &mut score,
                        reporter,
                        &self.cancel,
                    )
                    .await
                }
            }
        };

        collector.stop().await;

        let result = score.finalize(termination);
        tracing::info!(
            correct = result.correct_count,
            total = result.total_questions,
            termination = %result.termination,
            "round finished"
        );
        reporter.on_round_complete(&result);
        Ok(result)
    }
}

/// Wait for a `Y` line. Returns `false` if the input closed first.
async fn await_start(
    input: &mut InputHandle,
    mode: &RoundMode,
    reporter: &dyn QuizReporter,
) -> bool {
    let mut attempt = 1;
    loop {
        reporter.on_awaiting_start(mode, attempt);
        match input.next_line().await {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => return true,
            Some(_) => attempt += 1,
            None => return false,
        }
    }
}

/// Ask every question back to back while one round timer runs.
async fn run_global(
    questions: &[Question],
    budget: Duration,
    input: &mut InputHandle,
    score: &mut ScoreAggregator,
    reporter: &dyn QuizReporter,
) -> TerminationReason {
    let round_timer = tokio::time::sleep(budget);
    tokio::pin!(round_timer);

    for (index, q) in questions.iter().enumerate() {
        let number = index + 1;
        reporter.on_question(number, &q.prompt);

        let line = tokio::select! {
            () = &mut round_timer => {
                tracing::debug!(question = number, "round timer fired mid-question");
                return TerminationReason::GlobalTimeout;
            }
            line = input.next_line() => line,
        };

        let Some(raw) = line else {
            return TerminationReason::InputClosed;
        };

        let outcome = question::classify(number, q, &raw);
        reporter.on_outcome(number, outcome);
        score.record(outcome);
    }

    TerminationReason::Completed
}

/// Ask every question with the same fixed timeout.
async fn run_per_question(
    questions: &[Question],
    runner: &QuestionRunner,
    input: &mut InputHandle,
    score: &mut ScoreAggregator,
    reporter: &dyn QuizReporter,
    cancel: &CancellationToken,
) -> TerminationReason {
    for (index, q) in questions.iter().enumerate() {
        if input.is_closed() || cancel.is_cancelled() {
            return TerminationReason::InputClosed;
        }
        let Some(outcome) = runner.evaluate(index + 1, q, input, reporter, cancel).await else {
            return TerminationReason::InputClosed;
        };
        score.record(outcome);
    }

    TerminationReason::Completed
}
