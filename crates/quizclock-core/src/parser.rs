//! Quiz file loading.
//!
//! Reads question sets from `prompt,answer` CSV files or TOML quiz files,
//! shuffles them, and validates them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::{Question, Quiz};

/// Supported quiz file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizFormat {
    Csv,
    Toml,
}

impl QuizFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, QuizError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizFormat::Csv => write!(f, "csv"),
            QuizFormat::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for QuizFormat {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(QuizFormat::Csv),
            "toml" => Ok(QuizFormat::Toml),
            other => Err(QuizError::UnsupportedFormat(format!(
                "'{other}' (expected .csv or .toml)"
            ))),
        }
    }
}

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    #[serde(default)]
    quiz: Option<TomlQuizHeader>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    answer: toml::Value,
}

/// Load a quiz file, choosing the format from its extension.
pub fn load_quiz(path: &Path) -> Result<Quiz> {
    let format = QuizFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    let mut quiz = parse_quiz_str(&content, format)
        .with_context(|| format!("failed to load quiz: {}", path.display()))?;
    if quiz.name.is_empty() {
        quiz.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(quiz)
}

/// Load only the questions of a quiz file.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    Ok(load_quiz(path)?.questions)
}

/// Parse quiz content held in memory.
///
/// CSV content has no name; the returned quiz's name is empty.
pub fn parse_quiz_str(content: &str, format: QuizFormat) -> Result<Quiz> {
    match format {
        QuizFormat::Csv => Ok(Quiz {
            name: String::new(),
            description: String::new(),
            questions: parse_csv(content)?,
        }),
        QuizFormat::Toml => parse_toml(content),
    }
}

/// Parse `prompt,answer` records. Quoted fields follow the usual CSV rules
/// (`""` escapes a quote, quoted fields may span lines). The answer is the
/// last field; any fields before it are rejoined into the prompt, so an
/// unquoted prompt may still contain commas.
fn parse_csv(content: &str) -> Result<Vec<Question>, QuizError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut questions = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record_number = |position: Option<&csv::Position>| {
            position.map_or(index + 1, |p| p.line() as usize)
        };
        let record = result.map_err(|e| QuizError::Parse {
            record: record_number(e.position()),
            message: e.to_string(),
        })?;
        let line = record_number(record.position());

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        let Some((answer, prompt)) = fields.split_last().filter(|(_, p)| !p.is_empty()) else {
            return Err(QuizError::Parse {
                record: line,
                message: format!("expected 'prompt,answer', got '{}'", fields.join(",")),
            });
        };

        questions.push(Question {
            prompt: prompt.join(",").trim().to_string(),
            answer: parse_answer(line, answer)?,
        });
    }
    Ok(questions)
}

fn parse_toml(content: &str) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content).context("failed to parse TOML")?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            let record = index + 1;
            let answer = match q.answer {
                toml::Value::Integer(n) => n,
                toml::Value::String(s) => parse_answer(record, &s)?,
                other => {
                    return Err(QuizError::Parse {
                        record,
                        message: format!("answer must be an integer, got {}", other.type_str()),
                    })
                }
            };
            Ok(Question {
                prompt: q.prompt,
                answer,
            })
        })
        .collect::<Result<Vec<_>, QuizError>>()?;

    let (name, description) = parsed
        .quiz
        .map(|h| (h.name, h.description))
        .unwrap_or_default();

    Ok(Quiz {
        name,
        description,
        questions,
    })
}

fn parse_answer(record: usize, raw: &str) -> Result<i64, QuizError> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| QuizError::Parse {
        record,
        message: format!("answer '{trimmed}' is not an integer"),
    })
}

/// Shuffle questions uniformly in place.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz has no questions".into(),
        });
    }

    // Check for empty prompts
    for (index, q) in quiz.questions.iter().enumerate() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(index + 1),
                message: "prompt is empty".into(),
            });
        }
    }

    // Check for duplicate prompts
    let mut seen = std::collections::HashSet::new();
    for (index, q) in quiz.questions.iter().enumerate() {
        if !q.prompt.trim().is_empty() && !seen.insert(q.prompt.trim()) {
            warnings.push(ValidationWarning {
                question: Some(index + 1),
                message: format!("duplicate prompt: {}", q.prompt),
            });
        }
    }

    warnings
}
