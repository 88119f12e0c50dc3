//! quizclock configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizclock configuration.
///
/// Command-line flags take precedence over everything loaded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizclockConfig {
    /// Default quiz file.
    #[serde(default = "default_problems")]
    pub problems: PathBuf,
    /// Time budget for a round, in seconds.
    #[serde(default = "default_limit")]
    pub limit_secs: u64,
    /// Split the budget evenly across questions.
    #[serde(default)]
    pub split: bool,
    /// Shuffle questions before each round.
    #[serde(default)]
    pub shuffle: bool,
    /// Ask the player to press Y before the clock starts.
    #[serde(default = "default_start_gate")]
    pub start_gate: bool,
}

fn default_problems() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_limit() -> u64 {
    30
}
fn default_start_gate() -> bool {
    true
}

impl Default for QuizclockConfig {
    fn default() -> Self {
        Self {
            problems: default_problems(),
            limit_secs: default_limit(),
            split: false,
            shuffle: false,
            start_gate: default_start_gate(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
///
/// Environment variable overrides: `QUIZCLOCK_LIMIT`, `QUIZCLOCK_PROBLEMS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizclockConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizclockConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizclockConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

fn apply_env_overrides(
    config: &mut QuizclockConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(limit) = lookup("QUIZCLOCK_LIMIT") {
        config.limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("QUIZCLOCK_LIMIT must be whole seconds, got '{limit}'"))?;
    }
    if let Some(problems) = lookup("QUIZCLOCK_PROBLEMS") {
        config.problems = PathBuf::from(problems);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}
