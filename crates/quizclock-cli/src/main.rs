//! quizclock CLI — timed quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizclock", version, about = "Timed arithmetic quizzes in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz round
    Play {
        /// Quiz file (.csv with 'question,answer' lines, or .toml)
        #[arg(long)]
        problems: Option<PathBuf>,

        /// Time limit in seconds (default: 30)
        #[arg(long)]
        limit: Option<u64>,

        /// Split the limit evenly across questions (at least 2s each)
        #[arg(long)]
        split: bool,

        /// Shuffle the questions before the round
        #[arg(long)]
        shuffle: bool,

        /// Seed for --shuffle, for a repeatable order
        #[arg(long)]
        seed: Option<u64>,

        /// Start the clock immediately instead of waiting for [Y]
        #[arg(long)]
        no_gate: bool,

        /// Result format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a quiz file
    Validate {
        /// Quiz file to check
        #[arg(long)]
        problems: PathBuf,
    },

    /// Create a starter config and problems file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizclock=warn".parse().unwrap())
                .add_directive("quizclock_core=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            problems,
            limit,
            split,
            shuffle,
            seed,
            no_gate,
            format,
            config,
        } => {
            commands::play::execute(commands::play::PlayArgs {
                problems,
                limit,
                split,
                shuffle,
                seed,
                no_gate,
                format,
                config,
            })
            .await
        }
        Commands::Validate { problems } => commands::validate::execute(problems),
        Commands::Init => commands::init::execute(),
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };

    // Exit explicitly: tokio's stdin reader may still be parked on a blocking
    // read, and dropping the runtime would wait for it.
    process::exit(code);
}
