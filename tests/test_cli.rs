use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_filter-lang")
}

fn run_ok(args: &[&str]) -> String {
    let output = Command::new(bin())
        .args(args)
        .output()
        .expect("command should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_normalize_canonicalizes_input() {
    let stdout = run_ok(&["normalize", "  first=-3   apply_overrides=5  rows=100"]);
    assert_eq!(stdout.trim(), "first=1 apply_overrides=1 rows=100");
}

#[test]
fn test_parse_json_lists_terms() {
    let stdout = run_ok(&["-F", "json", "parse", "rows=100 severity>3"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");

    assert_eq!(value["filter"], "rows=100 severity>3");
    assert_eq!(value["term_count"], 2);
    let terms = value["terms"].as_array().expect("terms array");
    assert_eq!(terms[0]["keyword"], "rows");
    assert_eq!(terms[0]["relation"], "=");
    assert_eq!(terms[0]["value"], 100);
    assert_eq!(terms[1]["keyword"], "severity");
    assert_eq!(terms[1]["relation"], ">");
    assert_eq!(terms[1]["value"], "3");
}

#[test]
fn test_combine_later_singletons_win() {
    let stdout = run_ok(&["combine", "severity>3 rows=10", "first=41 rows=40"]);
    assert_eq!(stdout.trim(), "severity>3 rows=40 first=41");
}

#[test]
fn test_get_reports_value() {
    let stdout = run_ok(&["-F", "json", "get", "rows=100 first=1", "rows"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert_eq!(value["keyword"], "rows");
    assert_eq!(value["value"], 100);
}

#[test]
fn test_get_missing_keyword_is_null_in_json() {
    let stdout = run_ok(&["-F", "json", "get", "rows=100", "sort"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert!(value["value"].is_null());
}

#[test]
fn test_set_replaces_term() {
    let stdout = run_ok(&["set", "rows=10 first=1", "rows", "50"]);
    assert_eq!(stdout.trim(), "rows=50 first=1");
}

#[test]
fn test_set_with_relation_flag() {
    let stdout = run_ok(&["set", "rows=10", "min_qod", "70", "-r", ">"]);
    assert_eq!(stdout.trim(), "rows=10 min_qod>70");
}

#[test]
fn test_set_without_value_removes_term() {
    let stdout = run_ok(&["set", "name=scan rows=10", "name"]);
    assert_eq!(stdout.trim(), "rows=10");
}

#[test]
fn test_set_rejects_unknown_relation() {
    let output = Command::new(bin())
        .args(["set", "rows=10", "min_qod", "70", "-r", "!"])
        .output()
        .expect("command should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown relation"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_output_file_receives_rendered_result() {
    let dir = tempdir().expect("temp dir");
    let out = dir.path().join("out.json");

    run_ok(&[
        "-F",
        "json",
        "-o",
        out.to_str().expect("utf8 path"),
        "normalize",
        "rows=10 rows=20",
    ]);

    let content = fs::read_to_string(&out).expect("output file should exist");
    let value: serde_json::Value = serde_json::from_str(&content).expect("JSON in output file");
    assert_eq!(value["filter"], "rows=20");
}
