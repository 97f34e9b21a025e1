use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn corpuskit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("corpuskit").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("lemmas.csv"),
        "type,pos,headword,freq,range\n\
         lemma,noun,love,30,3\n\
         lemma,verb,go,abc,2\n\
         lemma,noun,night,10,1\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("lyrics.txt"),
        "Love me tender\nlove me true\n\nAll my LOVE\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("glossary.txt"),
        "Title: Glossary • v1\n\
         Author: Someone\n\
         1: abide • to tolerate\n\
         2: or endure\n\
         \n\
         3: abode • a home\n",
    )
    .unwrap();
    dir
}

#[test]
fn kwic_prints_matches_and_summary() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["kwic", "love", "lyrics.txt", "-w", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Love]"))
        .stdout(predicate::str::contains("[LOVE]"))
        .stdout(predicate::str::contains("3 matches for 'love' in 1 file"));
}

#[test]
fn kwic_json_output() {
    let dir = workspace();
    let output = corpuskit(dir.path())
        .args(["-o", "json", "kwic", "tender", "lyrics.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["term"], "tender");
    assert_eq!(json["totalMatches"], 1);
    assert_eq!(json["results"][0]["keyword"], "tender");
    assert_eq!(json["results"][0]["position"], 8);
    assert_eq!(json["results"][0]["lineNumber"], 1);
}

#[test]
fn freq_parses_corpus_listing() {
    let dir = workspace();
    let output = corpuskit(dir.path())
        .args(["-o", "json", "freq", "lemmas.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalTokens"], 40);
    let words = json["words"].as_array().unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0]["headword"], "love");
    assert_eq!(words[0]["normFreq"], 750000.0);
    assert_eq!(words[1]["rank"], 3);
}

#[test]
fn parse_is_an_alias_for_freq() {
    let dir = workspace();
    let output = corpuskit(dir.path())
        .args(["-o", "json", "parse", "lemmas.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalTokens"], 40);
}

#[test]
fn freq_builds_list_from_running_text() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["freq", "lyrics.txt", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("love"))
        .stdout(predicate::str::contains("tender").not());
}

#[test]
fn preprocess_writes_one_entry_per_line() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["preprocess", "glossary.txt"])
        .assert()
        .success()
        .stdout("abide • to tolerate or endure\nabode • a home\n");
}

#[test]
fn preprocess_report_to_file() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["preprocess", "glossary.txt", "--out", "clean.txt", "--report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries: 2"));

    let clean = fs::read_to_string(dir.path().join("clean.txt")).unwrap();
    assert_eq!(clean.lines().count(), 2);
}

#[test]
fn stats_honours_local_config() {
    let dir = workspace();
    fs::write(dir.path().join(".corpuskit.toml"), "ngram_size = 3\n").unwrap();
    corpuskit(dir.path())
        .args(["stats", "lyrics.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 3-grams"))
        .stdout(predicate::str::contains("Segments: 2"));
}

#[test]
fn local_config_can_restore_default_over_global() {
    let dir = workspace();
    let global_dir = dir.path().join("xdg").join("corpuskit");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(global_dir.join("config.toml"), "ngram_size = 3\n").unwrap();
    fs::write(dir.path().join(".corpuskit.toml"), "ngram_size = 2\n").unwrap();

    corpuskit(dir.path())
        .args(["stats", "lyrics.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2-grams"))
        .stdout(predicate::str::contains("Top 3-grams").not());
}

#[test]
fn invalid_config_is_rejected() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["stats", "lyrics.txt", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ngram_size must be at least 1"));
}

#[test]
fn dispersion_reports_range() {
    let dir = workspace();
    corpuskit(dir.path())
        .args(["dispersion", "love", "lyrics.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Occurrences: 3"))
        .stdout(predicate::str::contains("Range: 2/2"));
}

#[test]
fn demo_runs_on_bundled_corpus() {
    let dir = tempdir().unwrap();
    corpuskit(dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample_corpus.txt"))
        .stdout(predicate::str::contains("river"));
}

#[test]
fn missing_files_fail() {
    let dir = tempdir().unwrap();
    corpuskit(dir.path())
        .args(["kwic", "x", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readable input files"));
}
