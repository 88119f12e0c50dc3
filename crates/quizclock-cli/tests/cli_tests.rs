//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROBLEMS: &str = "5+5,10\n1+1,2\n";

/// Run quizclock inside `dir` with no user config or env overrides leaking in.
fn quizclock(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizclock").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZCLOCK_LIMIT")
        .env_remove("QUIZCLOCK_PROBLEMS");
    cmd
}

fn workspace_with(name: &str, content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(name), content).unwrap();
    dir
}

#[test]
fn play_all_correct() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["play", "--no-gate"])
        .write_stdin("10\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem #1: 5+5 = "))
        .stdout(predicate::str::contains("Problem #2: 1+1 = "))
        .stdout(predicate::str::contains("You've finished all the problems!"))
        .stdout(predicate::str::contains("scored 2 out of 2"));
}

#[test]
fn play_waits_for_start_confirmation() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .arg("play")
        .write_stdin("n\nY\n10\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("press [Y] to start"))
        .stdout(predicate::str::contains("quiz is started"))
        .stdout(predicate::str::contains("scored 1 out of 2"));
}

#[test]
fn play_split_mode() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["play", "--no-gate", "--split", "--limit", "10"])
        .write_stdin("10\nabc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5s to solve each problem"))
        .stdout(predicate::str::contains("scored 1 out of 2"));
}

#[test]
fn play_split_mode_warns_that_late_answer_is_discarded() {
    let dir = workspace_with("problems.csv", "5+5,10\n");

    // No answer: the single question runs into its 2s floor.
    quizclock(&dir)
        .args(["play", "--no-gate", "--split", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runs out of time"))
        .stdout(predicate::str::contains("late answer discarded"))
        .stdout(predicate::str::contains("scored 0 out of 1"));
}

#[test]
fn play_json_output() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["play", "--no-gate", "--format", "json"])
        .write_stdin("10\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"correct_count\": 2"))
        .stdout(predicate::str::contains("\"termination\": \"completed\""));
}

#[test]
fn play_input_ends_early() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["play", "--no-gate"])
        .write_stdin("10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("input closed"))
        .stdout(predicate::str::contains("scored 1 out of 2"));
}

#[test]
fn play_toml_quiz_with_seeded_shuffle() {
    let dir = workspace_with(
        "quiz.toml",
        r#"
[quiz]
name = "Same answers"

[[questions]]
prompt = "2*3"
answer = 6

[[questions]]
prompt = "1+5"
answer = 6
"#,
    );

    quizclock(&dir)
        .args([
            "play",
            "--no-gate",
            "--problems",
            "quiz.toml",
            "--shuffle",
            "--seed",
            "42",
        ])
        .write_stdin("6\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("scored 2 out of 2"));
}

#[test]
fn play_uses_config_file() {
    let dir = workspace_with("math.csv", "9-3,6\n");
    std::fs::write(
        dir.path().join("quizclock.toml"),
        "problems = \"math.csv\"\nstart_gate = false\n",
    )
    .unwrap();

    quizclock(&dir)
        .arg("play")
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("9-3"))
        .stdout(predicate::str::contains("scored 1 out of 1"));
}

#[test]
fn play_missing_problems_file() {
    let dir = TempDir::new().unwrap();

    quizclock(&dir)
        .args(["play", "--problems", "nonexistent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn play_rejects_non_integer_answer_in_file() {
    let dir = workspace_with("problems.csv", "5+5,10\n1+1,two\n");

    quizclock(&dir)
        .args(["play", "--no-gate"])
        .write_stdin("10\n2\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Problem #1").not())
        .stderr(predicate::str::contains("record 2"));
}

#[test]
fn play_rejects_unknown_file_type() {
    let dir = workspace_with("problems.yaml", "- 1+1: 2\n");

    quizclock(&dir)
        .args(["play", "--problems", "problems.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported quiz format"));
}

#[test]
fn play_rejects_empty_quiz() {
    let dir = workspace_with("problems.csv", "\n");

    quizclock(&dir)
        .args(["play", "--no-gate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn play_rejects_zero_limit() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["play", "--no-gate", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("time budget must be positive"));
}

#[test]
fn validate_valid_quiz() {
    let dir = workspace_with("problems.csv", PROBLEMS);

    quizclock(&dir)
        .args(["validate", "--problems", "problems.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz: problems (2 questions)"))
        .stdout(predicate::str::contains("Quiz is valid."));
}

#[test]
fn validate_reports_duplicates() {
    let dir = workspace_with("problems.csv", "1+1,2\n1+1,2\n");

    quizclock(&dir)
        .args(["validate", "--problems", "problems.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[#2] WARNING: duplicate prompt"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizclock(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizclock.toml"))
        .stdout(predicate::str::contains("Created problems.csv"));

    assert!(dir.path().join("quizclock.toml").exists());
    assert!(dir.path().join("problems.csv").exists());

    // The starter files load cleanly.
    quizclock(&dir)
        .args(["validate", "--problems", "problems.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 questions"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizclock(&dir).arg("init").assert().success();

    // Second init should skip
    quizclock(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
