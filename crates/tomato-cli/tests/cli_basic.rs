//! Basic CLI E2E tests.
//!
//! Tests invoke the compiled binary with an isolated config directory.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tomato"))
        .args(args)
        .env("TOMATO_CONFIG_DIR", config_dir)
        .env_remove("TOMATO_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn one_minute_config(dir: &Path) {
    std::fs::write(
        dir.join("config.toml"),
        "[durations]\nwork_min = 1\nshort_break_min = 1\nlong_break_min = 1\n",
    )
    .unwrap();
}

#[test]
fn test_format() {
    let dir = tempfile::tempdir().unwrap();
    for (secs, expected) in [("0", "0:00"), ("59", "0:59"), ("60", "1:00"), ("1500", "25:00")] {
        let (out, _, code) = run_cli(dir.path(), &["format", secs]);
        assert_eq!(code, 0);
        assert_eq!(out.trim(), expected);
    }
}

#[test]
fn test_plan_lists_cadence() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["plan", "--count", "9", "--json"]);
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();
    let kinds: Vec<&str> = plan
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "work",
            "short_break",
            "work",
            "short_break",
            "work",
            "short_break",
            "work",
            "long_break",
            "work"
        ]
    );
    assert_eq!(plan[0]["duration_secs"], 1500);
    assert_eq!(plan[7]["duration_secs"], 1200);
}

#[test]
fn test_plan_text_total() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["plan"]);
    assert_eq!(code, 0);
    assert!(out.contains("Long Break"));
    assert!(out.trim_end().ends_with("total 135:00"));
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "get", "durations.work_min"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "25");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "durations.work_min", "30"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(dir.path(), &["config", "get", "durations.work_min"]);
    assert_eq!(out.trim(), "30");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(dir.path(), &["config", "set", "durations.work_min", "0"]);
    assert_eq!(code, 1);
    assert!(err.contains("error:"));

    let (_, err, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(err.contains("unknown key"));
}

#[test]
fn test_config_rejects_oversized_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(
        dir.path(),
        &["config", "set", "durations.work_min", "9223372036854775807"],
    );
    assert_eq!(code, 1);
    assert!(err.contains("durations.work_min"), "stderr: {err}");

    let (out, err, code) = run_cli(dir.path(), &["plan"]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.trim_end().ends_with("total 135:00"));
}

#[test]
fn test_run_json_events() {
    let dir = tempfile::tempdir().unwrap();
    one_minute_config(dir.path());
    let (out, err, code) = run_cli(
        dir.path(),
        &["run", "--json", "--speed", "100000", "--max-intervals", "2"],
    );
    assert_eq!(code, 0, "stderr: {err}");

    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let started: Vec<&str> = events
        .iter()
        .filter(|e| e["type"] == "interval_started")
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(&started[..2], &["work", "short_break"]);

    let work_ticks = events
        .iter()
        .take_while(|e| e["type"] != "interval_completed")
        .filter(|e| e["type"] == "tick")
        .count();
    // Initial render plus one per second down to 1.
    assert_eq!(work_ticks, 60);
    assert_eq!(events[1]["display"], "1:00");
}

#[test]
fn test_run_text_output() {
    let dir = tempfile::tempdir().unwrap();
    one_minute_config(dir.path());
    let (out, err, code) = run_cli(dir.path(), &["run", "--speed", "100000", "--max-intervals", "1"]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.starts_with("== Work (#1)\nWork 1:00\n"));
    assert!(out.contains("Work finished"));
}

#[test]
fn test_run_ends_when_stdout_closes() {
    use std::io::{BufRead, BufReader};

    let dir = tempfile::tempdir().unwrap();
    one_minute_config(dir.path());
    let mut child = Command::new(env!("CARGO_BIN_EXE_tomato"))
        .args(["run", "--json", "--speed", "100000"])
        .env("TOMATO_CONFIG_DIR", dir.path())
        .env_remove("TOMATO_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI");

    let mut first = String::new();
    BufReader::new(child.stdout.take().unwrap())
        .read_line(&mut first)
        .unwrap();
    assert!(first.contains("interval_started"));

    // Reader dropped; without --max-intervals only the closed pipe ends the run.
    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(out.contains("tomato"));
}
