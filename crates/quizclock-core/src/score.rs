//! Score tally for a single round.

use crate::model::{AnswerOutcome, OutcomeCounts, RoundResult, TerminationReason};

/// Accumulates outcomes from the round driver.
///
/// Only the driver writes to it, one outcome at a time.
#[derive(Debug)]
pub struct ScoreAggregator {
    total_questions: usize,
    counts: OutcomeCounts,
}

impl ScoreAggregator {
    pub fn new(total_questions: usize) -> Self {
        Self {
            total_questions,
            counts: OutcomeCounts::default(),
        }
    }

    pub fn record(&mut self, outcome: AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct => self.counts.correct += 1,
            AnswerOutcome::Incorrect => self.counts.incorrect += 1,
            AnswerOutcome::TimedOut => self.counts.timed_out += 1,
            AnswerOutcome::Unparseable => self.counts.unparseable += 1,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.counts.correct
    }

    pub fn finalize(self, termination: TerminationReason) -> RoundResult {
        RoundResult {
            total_questions: self.total_questions,
            correct_count: self.counts.correct,
            termination,
            outcomes: self.counts,
        }
    }
}
