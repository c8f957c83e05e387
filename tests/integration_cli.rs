// Drives the compiled binary's batch flags against a throwaway HOME.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const SEEDED_LOG: &str = r#"[
  {"id":"2","wpm":61,"accuracy":98,"time":40,"textType":"quotes","date":"2024-03-02T10:00:00.000Z","errors":1},
  {"id":"1","wpm":35,"accuracy":88,"time":55,"textType":"numbers","date":"2024-03-01T10:00:00.000Z","errors":6}
]"#;

fn typi(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("typi").unwrap();
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");
    cmd
}

fn results_file(home: &Path) -> PathBuf {
    home.join(".local/state/typi/typi-results.json")
}

fn seeded_home() -> TempDir {
    let home = tempdir().unwrap();
    let path = results_file(home.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, SEEDED_LOG).unwrap();
    home
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn lists_categories() {
    let home = tempdir().unwrap();
    let out = stdout_of(typi(home.path()).arg("--list-categories"));
    for id in ["common-words", "quotes", "programming", "numbers", "burmese"] {
        assert!(out.contains(id), "missing {id} in {out}");
    }
}

#[test]
fn empty_history() {
    let home = tempdir().unwrap();
    let out = stdout_of(typi(home.path()).arg("--history"));
    assert!(out.starts_with("tests: 0"));
    assert!(!results_file(home.path()).exists());
}

#[test]
fn history_reports_aggregates_and_sorts() {
    let home = seeded_home();
    let out = stdout_of(typi(home.path()).args(["--history", "--sort-by", "wpm", "--order", "asc"]));

    assert!(out.contains("tests: 2"));
    assert!(out.contains("avg wpm: 48"));
    assert!(out.contains("best wpm: 61"));
    let numbers = out.find("numbers").unwrap();
    let quotes = out.find("quotes").unwrap();
    assert!(numbers < quotes);
}

#[test]
fn exports_csv() {
    let home = seeded_home();
    let csv_path = home.path().join("results.csv");
    let out = stdout_of(typi(home.path()).arg("--export-csv").arg(&csv_path));
    assert!(out.contains("exported 2 results"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2,2024-03-02T10:00:00.000Z,61,98,40,quotes,1");
}

#[test]
fn clear_history_removes_log() {
    let home = seeded_home();
    let out = stdout_of(typi(home.path()).arg("--clear-history"));
    assert!(out.contains("history cleared"));
    assert!(!results_file(home.path()).exists());

    let out = stdout_of(typi(home.path()).arg("--history"));
    assert!(out.starts_with("tests: 0"));
}

#[test]
fn save_config_persists_flags() {
    let home = tempdir().unwrap();
    stdout_of(typi(home.path()).args(["--save-config", "-c", "numbers", "-s", "30", "--list-categories"]));

    let raw = fs::read_to_string(home.path().join(".config/typi/config.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["category"], "numbers");
    assert_eq!(saved["timed_secs"], 30);
}

#[test]
fn refuses_to_start_without_tty() {
    let home = tempdir().unwrap();
    let output = typi(home.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tty"));
}
