//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify outputs.

use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config_dir: &std::path::Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stillpoint"))
        .args(args)
        .env("STILLPOINT_CONFIG_DIR", config_dir)
        .env_remove("STILLPOINT_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("line is not JSON"))
        .collect()
}

#[test]
fn test_presets_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["presets", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("* box"));
    assert!(stdout.contains("focus-25"));
}

#[test]
fn test_presets_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["presets", "list", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"box"));
    assert!(ids.contains(&"4-7-8"));
}

#[test]
fn test_presets_show() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["presets", "show", "box"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Box Breathing"));
    assert!(stdout.contains("cycle: 16s"));
}

#[test]
fn test_presets_show_unknown_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["presets", "show", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown preset"));
}

#[test]
fn test_simulate_box_first_phase_change() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["simulate", "box", "--seconds", "4.5", "--frame-ms", "250"],
    );
    assert_eq!(code, 0);
    let lines = json_lines(&stdout);
    assert_eq!(lines[0]["type"], "session_started");
    assert!(lines.iter().any(|l| l["type"] == "phase_advanced" && l["to"] == 1));

    let last = lines.last().unwrap();
    assert_eq!(last["frame"]["phase_index"], 1);
    assert_eq!(last["frame"]["label"], "Hold");
    assert_eq!(last["frame"]["scale"], 1.8);
}

#[test]
fn test_simulate_timer_completes() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &[
            "simulate", "focus-25", "--minutes", "0.05", "--seconds", "10", "--frame-ms", "100",
        ],
    );
    assert_eq!(code, 0);
    let lines = json_lines(&stdout);
    let completed = lines
        .iter()
        .filter(|l| l["type"] == "session_completed")
        .count();
    assert_eq!(completed, 1);
    let last = lines.last().unwrap();
    assert_eq!(last["frame"]["state"], "completed");
    assert_eq!(last["frame"]["remaining_seconds"], 0.0);
    assert_eq!(last["frame"]["label"], "Focus");
}

#[test]
fn test_simulate_pause_window() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &[
            "simulate", "box", "--seconds", "10", "--frame-ms", "250", "--pause-at", "1",
            "--resume-at", "9",
        ],
    );
    assert_eq!(code, 0);
    let lines = json_lines(&stdout);
    assert!(lines.iter().any(|l| l["type"] == "session_paused"));
    assert!(lines.iter().any(|l| l["type"] == "session_resumed"));
    let last = lines.last().unwrap();
    // 0.75 s before the pause, 1.0 s after resuming.
    assert_eq!(last["frame"]["total_elapsed"], 1.75);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "display.fps", "12"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "display.fps"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "12");
}

#[test]
fn test_config_rejects_unknown_default_preset() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        dir.path(),
        &["config", "set", "session.default_preset", "missing"],
    );
    assert_eq!(code, 1);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "session.default_preset"]);
    assert_eq!(stdout.trim(), "box");
}

#[test]
fn test_run_breathing_stops_after_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["run", "box", "--duration", "0.3", "--fps", "50"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Box Breathing"));
    assert!(stdout.contains("Inhale"));
}

#[test]
fn test_run_timer_completes() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["run", "focus-25", "--minutes", "0.005", "--fps", "100"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Session complete"));
}

#[test]
fn test_run_cycles_rejected_for_timer() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["run", "focus-25", "--cycles", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--cycles needs a breathing preset"));
}

#[test]
fn test_run_rejects_overflowing_minutes() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["run", "focus-25", "--minutes", "1e308"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("is not a finite number"));
}
