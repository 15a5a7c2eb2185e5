//! Integration tests for the intertext-finder CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_inputs(dir: &TempDir) -> (String, String) {
    let primary = dir.path().join("primary.txt");
    let secondary = dir.path().join("secondary.txt");
    fs::write(&primary, "The quick brown fox jumps over the lazy dog.").unwrap();
    fs::write(&secondary, "A quick brown dog naps under a lazy fox.").unwrap();
    (
        primary.display().to_string(),
        secondary.display().to_string(),
    )
}

#[test]
fn test_compare_text_report_to_stdout() {
    let dir = TempDir::new().unwrap();
    let (primary, secondary) = write_inputs(&dir);

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "compare", "--primary", &primary, "--secondary", &secondary])
        .args(["--window-size", "3", "--minimum-matches", "2"])
        .args(["--use-porter-stemmer", "false"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Fuzzy Search Parameters: 2/3"))
        .stdout(predicate::str::contains("Left Match Count:"))
        .stdout(predicate::str::contains("quick brown"));
}

#[test]
fn test_compare_json_to_file() {
    let dir = TempDir::new().unwrap();
    let (primary, secondary) = write_inputs(&dir);
    let output = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "compare", "--primary", &primary, "--secondary", &secondary])
        .args(["--window-size", "2", "--minimum-matches", "2", "--format", "json"])
        .arg("--output")
        .arg(&output);
    cmd.assert().success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["parameters"]["window_size"], 2);
    assert!(json["left_match_count"].as_u64().unwrap() >= 1);
}

#[test]
fn test_compare_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let (primary, secondary) = write_inputs(&dir);
    let config = dir.path().join("params.toml");
    fs::write(&config, "window_size = 4\nminimum_matches = 1\nprint_best_only = false\n").unwrap();

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "compare", "--primary", &primary, "--secondary", &secondary])
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Fuzzy Search Parameters: 1/4"))
        .stdout(predicate::str::contains("Print Best Scores Only: No"));
}

#[test]
fn test_invalid_configuration_fails() {
    let dir = TempDir::new().unwrap();
    let (primary, secondary) = write_inputs(&dir);

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "compare", "--primary", &primary, "--secondary", &secondary])
        .args(["--window-size", "2", "--minimum-matches", "3"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MinimumMatchesExceedsWindow"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let (primary, _) = write_inputs(&dir);

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "compare", "--primary", &primary, "--secondary"])
        .arg(dir.path().join("missing.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_tokens_marks_stop_words() {
    let dir = TempDir::new().unwrap();
    let (primary, _) = write_inputs(&dir);

    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.args(["--quiet", "tokens", "--input", &primary]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("The\tthe\t(stop)"))
        .stdout(predicate::str::contains("jumps\tjump"));
}

#[test]
fn test_stopwords_lists_articles() {
    let mut cmd = Command::cargo_bin("intertext-finder").unwrap();
    cmd.arg("stopwords");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("the\n"));
}
