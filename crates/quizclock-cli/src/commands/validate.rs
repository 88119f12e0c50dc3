//! The `quizclock validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(problems: PathBuf) -> Result<()> {
    let quiz = quizclock_core::parser::load_quiz(&problems)?;

    println!("Quiz: {} ({} questions)", quiz.name, quiz.questions.len());

    let warnings = quizclock_core::parser::validate_quiz(&quiz);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [#{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
