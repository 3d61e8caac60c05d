//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn judgetest(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("judgetest").unwrap();
    cmd.current_dir(dir.path()).env_remove("JUDGETEST_DATA_DIR");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    judgetest(&dir).arg("init").assert().success();
    dir
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    judgetest(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created judgetest.toml"))
        .stdout(predicate::str::contains("Created data/kumite_questions.csv"))
        .stdout(predicate::str::contains("Created data/kata_questions.csv"));

    assert!(dir.path().join("judgetest.toml").exists());
    assert!(dir.path().join("data/kumite_questions.csv").exists());
    assert!(dir.path().join("data/kata_questions.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized();

    judgetest(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_sample_banks() {
    let dir = initialized();

    judgetest(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kumite"))
        .stdout(predicate::str::contains("12"))
        .stdout(predicate::str::contains("Kata"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_reports_duplicates() {
    let dir = initialized();
    std::fs::write(
        dir.path().join("data/kata_questions.csv"),
        "question\nRei comes first.\nRei  comes first.\n",
    )
    .unwrap();

    judgetest(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Kata #2] WARNING: duplicate question"));
}

#[test]
fn validate_missing_bank_fails() {
    let dir = initialized();
    std::fs::remove_file(dir.path().join("data/kata_questions.csv")).unwrap();

    judgetest(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("Kata bank failed to load"))
        .stderr(predicate::str::contains("1 question bank(s) could not be loaded"));
}

#[test]
fn generate_writes_pdf() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kumite", "--count", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF generated successfully!"))
        .stdout(predicate::str::contains("Kumite_test.pdf"));

    let bytes = std::fs::read(dir.path().join("Kumite_test.pdf")).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn generate_uses_default_count_and_output_dir() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kata", "--format", "json"])
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    let json = std::fs::read_to_string(dir.path().join("out/Kata_test.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let questions = value["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["number"], 1);
    assert_eq!(questions[9]["number"], 10);
}

#[test]
fn generate_preview_prints_questions() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kata", "--count", "3", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1: "))
        .stdout(predicate::str::contains("Question 3: "))
        .stdout(predicate::str::contains("[  ] True   [  ] False"))
        .stdout(predicate::str::contains("Question 4: ").not());
}

#[test]
fn generate_more_than_bank_holds() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kumite", "--count", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("try 12 or fewer"));

    assert!(!dir.path().join("Kumite_test.pdf").exists());
}

#[test]
fn generate_rejects_out_of_range_counts() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kata", "--count", "51"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 50"));

    judgetest(&dir)
        .args(["generate", "--category", "kata", "--count", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn generate_with_missing_bank() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[banks]\nkumite = \"nowhere/kumite.csv\"\n").unwrap();

    judgetest(&dir)
        .args(["generate", "--category", "kumite"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("test generation failed"))
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn generate_unknown_category() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kihon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn generate_unknown_format() {
    let dir = initialized();

    judgetest(&dir)
        .args(["generate", "--category", "kata", "--format", "docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
