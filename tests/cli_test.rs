use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/all_day.geojson")
}

// Helper function to run the CLI command and capture stdout and stderr separately
fn run_command(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_quakeswarm"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute quakeswarm command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status.success(), stdout, stderr)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let fixture = fixture();
    let mut full_args = vec!["--input", fixture.to_str().unwrap(), "--format", "json"];
    full_args.extend_from_slice(args);

    let (success, stdout, stderr) = run_command(&full_args);
    assert!(success, "quakeswarm failed: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout should be a JSON report")
}

#[test]
fn test_help_command() {
    let (success, stdout, stderr) = run_command(&["--help"]);
    assert!(success, "Help command failed: {}", stderr);
    assert!(
        stdout.contains("find earthquake swarms"),
        "Help output doesn't contain expected text"
    );
    assert!(stdout.contains("--search-distance"));
    assert!(stdout.contains("--min-swarm-size"));
}

#[test]
fn test_json_report_from_file() {
    let report = run_json(&[]);
    assert_eq!(report["totalEvents"], 14);
    assert_eq!(report["relevantEvents"], 11);
    assert_eq!(report["swarmsFound"], 2);
    assert_eq!(report["swarmsRemaining"], 2);

    let swarms = report["swarms"].as_array().unwrap();
    assert_eq!(swarms[0]["count"], 6);
    assert_eq!(swarms[1]["count"], 5);
    assert!(swarms[0]["statistics"]["depth"]["average"].as_f64().unwrap() > 1.0);
    assert!(swarms[0]["timeWindow"]["start"].is_string());
}

#[test]
fn test_min_swarm_size_flag() {
    let report = run_json(&["--min-swarm-size", "6"]);
    assert_eq!(report["swarmsFound"], 2);
    assert_eq!(report["swarmsRemaining"], 1);
    assert_eq!(report["swarms"][0]["count"], 6);
}

#[test]
fn test_search_distance_flag() {
    // Every pair in the fixture clusters is more than 100 m apart
    let report = run_json(&["--search-distance", "0.1"]);
    assert_eq!(report["relevantEvents"], 0);
    assert_eq!(report["swarmsRemaining"], 0);
}

#[test]
fn test_text_report_from_file() {
    let fixture = fixture();
    let (success, stdout, stderr) = run_command(&["--input", fixture.to_str().unwrap()]);
    assert!(success, "quakeswarm failed: {}", stderr);
    assert!(stdout.contains("Swarm 0: 6 events"));
    assert!(stdout.contains("Swarm 1: 5 events"));
    assert!(stdout.contains("Magnitude: avg"));
}

#[test]
fn test_config_file_is_applied() {
    let config_dir = tempdir().expect("Failed to create temp config directory");
    let config_path = config_dir.path().join("quakeswarm.toml");
    fs::write(
        &config_path,
        r#"
[clustering]
min_swarm_size = 7

[output]
format = "json"
"#,
    )
    .expect("Failed to write test config file");

    let fixture = fixture();
    let (success, stdout, stderr) = run_command(&[
        "--config",
        config_path.to_str().unwrap(),
        "--input",
        fixture.to_str().unwrap(),
    ]);
    assert!(success, "quakeswarm failed: {}", stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["swarmsRemaining"], 0);
}

#[test]
fn test_invalid_search_distance_fails() {
    let fixture = fixture();
    let (success, _stdout, stderr) = run_command(&[
        "--input",
        fixture.to_str().unwrap(),
        "--search-distance",
        "0",
    ]);
    assert!(!success);
    assert!(stderr.contains("search_distance_km"), "stderr: {}", stderr);
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.geojson");
    let (success, _stdout, stderr) = run_command(&["--input", missing.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Failed to load events"), "stderr: {}", stderr);
}

#[test]
fn test_input_conflicts_with_feed_selection() {
    let fixture = fixture();
    let (success, _stdout, _stderr) = run_command(&[
        "--input",
        fixture.to_str().unwrap(),
        "--period",
        "week",
    ]);
    assert!(!success);
}
