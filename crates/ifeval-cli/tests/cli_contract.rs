use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SUITE: &str = "seed: 3
mode: test
constraints:
  - kind: no_commas
  - kind: word_count
    relation: at_most
    n: 6
";

fn ifeval() -> Command {
    let mut cmd = Command::cargo_bin("ifeval").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn instructions_renders_numbered_block() {
    let dir = tempdir().unwrap();
    let suite = dir.path().join("suite.yaml");
    fs::write(&suite, SUITE).unwrap();

    ifeval()
        .args(["instructions", "--suite"])
        .arg(&suite)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. In your entire response, refrain from the use of any commas.",
        ))
        .stdout(predicate::str::contains("2. Respond using at most 6 words."));
}

#[test]
fn check_passes_and_fails_with_exit_codes() {
    let dir = tempdir().unwrap();
    let suite = dir.path().join("suite.yaml");
    fs::write(&suite, SUITE).unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "Short and sweet.").unwrap();
    let bad = dir.path().join("bad.txt");
    fs::write(&bad, "Well, this answer is far too long to pass.").unwrap();

    ifeval()
        .args(["check", "-s"])
        .arg(&suite)
        .arg("-r")
        .arg(&good)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PASS  NoCommas (Punctuation)"));

    ifeval()
        .args(["check", "-s"])
        .arg(&suite)
        .arg("-r")
        .arg(&bad)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[No Commas] Expected no commas, found 1."))
        .stdout(predicate::str::contains("[Word Count] Expected at most 6 words, found 9."));
}

#[test]
fn check_reads_stdin_and_emits_json() {
    let dir = tempdir().unwrap();
    let suite = dir.path().join("suite.yaml");
    fs::write(&suite, SUITE).unwrap();

    let output = ifeval()
        .args(["check", "--format", "json", "-r", "-", "-s"])
        .arg(&suite)
        .write_stdin("fine answer")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["kind"], "NoCommas");
    assert_eq!(rows[1]["status"], "pass");
}

#[test]
fn competitive_suites_are_config_errors() {
    let dir = tempdir().unwrap();
    let suite = dir.path().join("suite.yaml");
    fs::write(
        &suite,
        "constraints:\n  - kind: all_lowercase\n  - kind: all_uppercase\n",
    )
    .unwrap();

    ifeval()
        .args(["instructions", "-s"])
        .arg(&suite)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined"));
}

#[test]
fn competitives_check_and_listing() {
    ifeval()
        .args(["competitives", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("competitive table OK (15 kinds)"));

    ifeval()
        .args(["competitives", "--kind", "WordCount"])
        .assert()
        .success()
        .stdout("WordCount: ShorterThanDocument\n");

    ifeval()
        .args(["competitives", "--kind", "Nope"])
        .assert()
        .code(2);
}
