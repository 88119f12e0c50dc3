//! The `quizclock init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizclock.toml
    if std::path::Path::new("quizclock.toml").exists() {
        println!("quizclock.toml already exists, skipping.");
    } else {
        std::fs::write("quizclock.toml", SAMPLE_CONFIG)?;
        println!("Created quizclock.toml");
    }

    // Create example problems
    let problems_path = std::path::Path::new("problems.csv");
    if problems_path.exists() {
        println!("problems.csv already exists, skipping.");
    } else {
        std::fs::write(problems_path, SAMPLE_PROBLEMS)?;
        println!("Created problems.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit problems.csv ('question,answer' per line)");
    println!("  2. Run: quizclock validate --problems problems.csv");
    println!("  3. Run: quizclock play --limit 30 --shuffle");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizclock configuration

problems = "problems.csv"
limit_secs = 30
split = false
shuffle = false
start_gate = true
"#;

const SAMPLE_PROBLEMS: &str = "5+5,10
1+1,2
8+3,11
1+2,3
8+6,14
3+1,4
1+4,5
5+1,6
2+3,5
3+3,6
2+4,6
5+2,7
";
