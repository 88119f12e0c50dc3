//! The `quizclock play` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use quizclock_core::model::{OutcomeCounts, RoundMode};
use quizclock_core::parser;
use quizclock_core::{
    AnswerOutcome, QuizReporter, RoundDriver, RoundResult, TerminationReason, TimingConfig,
};

use crate::config::load_config_from;

/// Flags for `quizclock play`.
pub struct PlayArgs {
    pub problems: Option<PathBuf>,
    pub limit: Option<u64>,
    pub split: bool,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub no_gate: bool,
    pub format: String,
    pub config: Option<PathBuf>,
}

/// Console reporter. Prompts go to stdout so the player sees them inline.
struct ConsoleReporter {
    gated: bool,
    split: bool,
}

impl ConsoleReporter {
    fn flush() {
        let _ = std::io::stdout().flush();
    }
}

impl QuizReporter for ConsoleReporter {
    fn on_awaiting_start(&self, mode: &RoundMode, attempt: u32) {
        if attempt == 1 {
            print!("You have {mode}, press [Y] to start: ");
        } else {
            print!("press [Y] to start: ");
        }
        Self::flush();
    }

    fn on_round_start(&self, mode: &RoundMode, question_count: usize) {
        if !self.gated {
            println!("You have {mode} ({question_count} problems).");
        }
        println!("quiz is started ...");
    }

    fn on_question(&self, number: usize, prompt: &str) {
        print!("Problem #{number}: {prompt} = ");
        Self::flush();
    }

    fn on_outcome(&self, _number: usize, outcome: AnswerOutcome) {
        if outcome == AnswerOutcome::TimedOut {
            println!(" <-this question runs out of time");
            if self.split {
                // The read for the expired question is still pending and
                // swallows the next line.
                println!("(late answer discarded: press Enter, then answer the next problem)");
            }
        }
    }

    fn on_round_complete(&self, result: &RoundResult) {
        match result.termination {
            TerminationReason::Completed => println!("\nYou've finished all the problems!"),
            TerminationReason::GlobalTimeout => println!("\ntime is up!"),
            TerminationReason::InputClosed => println!("\ninput closed before the quiz finished"),
        }
    }
}

pub async fn execute(args: PlayArgs) -> Result<()> {
    anyhow::ensure!(
        matches!(args.format.as_str(), "text" | "json"),
        "unknown format '{}': expected text or json",
        args.format
    );

    let config = load_config_from(args.config.as_deref())?;

    let problems = args.problems.unwrap_or(config.problems);
    let limit_secs = args.limit.unwrap_or(config.limit_secs);
    let split = args.split || config.split;
    let shuffle = args.shuffle || config.shuffle;
    let gated = config.start_gate && !args.no_gate;

    let mut quiz = parser::load_quiz(&problems)?;
    for w in parser::validate_quiz(&quiz) {
        tracing::warn!("{}: {}", problems.display(), w.message);
    }

    if shuffle {
        match args.seed {
            Some(seed) => {
                parser::shuffle_questions(&mut quiz.questions, &mut StdRng::seed_from_u64(seed))
            }
            None => parser::shuffle_questions(&mut quiz.questions, &mut rand::rng()),
        }
    }

    // Ctrl-C ends the round early but still reports the score.
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let driver = RoundDriver::new(TimingConfig::new(Duration::from_secs(limit_secs), split))
        .with_start_gate(gated)
        .with_cancellation(cancel);
    let reporter = ConsoleReporter { gated, split };

    let stdin = BufReader::new(tokio::io::stdin());
    let result = driver.run(&quiz.questions, stdin, &reporter).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "scored {} out of {}",
            result.correct_count, result.total_questions
        );
        print_summary(&result.outcomes, result.total_questions);
    }

    Ok(())
}

fn print_summary(outcomes: &OutcomeCounts, total: usize) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Correct",
        "Incorrect",
        "Unparseable",
        "Timed out",
        "Unanswered",
    ]);
    table.add_row(vec![
        Cell::new(outcomes.correct),
        Cell::new(outcomes.incorrect),
        Cell::new(outcomes.unparseable),
        Cell::new(outcomes.timed_out),
        Cell::new(total.saturating_sub(outcomes.answered())),
    ]);

    eprintln!("\n{table}");
}
