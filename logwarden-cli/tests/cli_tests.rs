//! Integration tests for the `logwarden` binary.
//!
//! Runs the built executable against real TOML and log files and checks
//! stdout, stderr and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const AUTH_LOG: &str = "\
Jan 10 06:30:00 web01 sshd[100]: Failed password for root from 203.0.113.9 port 5000 ssh2
Jan 10 06:30:10 web01 sshd[100]: Failed password for root from 203.0.113.9 port 5001 ssh2
Jan 10 06:30:20 web01 sshd[100]: Failed password for invalid user admin from 203.0.113.9 port 5002 ssh2
Jan 10 06:30:30 web01 sshd[100]: Failed password for root from 203.0.113.9 port 5003 ssh2
Jan 10 06:30:40 web01 sshd[100]: Failed password for root from 203.0.113.9 port 5004 ssh2
";

/// Run the binary inside `dir` so the default config path resolves there.
fn logwarden(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logwarden"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("should spawn logwarden")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_config_load_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("logwarden.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[detection.brute_force]
threshold = 3
window_minutes = 10

[report]
top_n = 2
"#;
    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let config = logwarden_core::config::LogwardenConfig::load(&config_path)
        .await
        .expect("valid config should load successfully");

    // Then: File values win, missing sections use defaults
    assert_eq!(config.detection.brute_force.threshold, 3);
    assert_eq!(config.detection.brute_force.window_minutes, 10);
    assert_eq!(config.detection.dos.threshold, 100);
    assert_eq!(config.report.top_n, 2);
}

#[tokio::test]
async fn test_config_load_missing_file() {
    // Given: A nonexistent file path
    let config_path = std::path::PathBuf::from("/nonexistent/logwarden.toml");

    // When: Loading the config
    let result = logwarden_core::config::LogwardenConfig::load(&config_path).await;

    // Then: Should fail
    assert!(result.is_err(), "missing file should fail to load");
}

#[test]
fn test_config_validate_valid_file_exits_zero() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("logwarden.toml"),
        "[general]\nlog_level = \"warn\"\n",
    )
    .expect("should write config");

    // When: Running `config validate`
    let output = logwarden(temp_dir.path(), &["config", "validate"]);

    // Then: VALID and exit 0
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("VALID"));
}

#[test]
fn test_config_validate_invalid_value_exits_two() {
    // Given: A config with a zero threshold
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("logwarden.toml"),
        "[detection.dos]\nthreshold = 0\n",
    )
    .expect("should write config");

    // When: Running `config validate`
    let output = logwarden(temp_dir.path(), &["config", "validate"]);

    // Then: INVALID with the field name and config exit code
    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("INVALID"));
    assert!(out.contains("detection.dos.threshold"));
}

#[test]
fn test_config_validate_explicit_missing_path_exits_two() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(
        temp_dir.path(),
        &["--config", "elsewhere.toml", "config", "validate"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("not found"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    // Given: No logwarden.toml in the working directory
    let temp_dir = TempDir::new().expect("should create temp dir");

    // When: Showing the detection section
    let output = logwarden(
        temp_dir.path(),
        &["config", "show", "--section", "detection"],
    );

    // Then: Built-in thresholds are shown
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("built-in defaults"));
    assert!(out.contains("threshold = 100"));
}

#[test]
fn test_config_show_json_output() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["--output", "json", "config", "show"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert!(json["source"].is_string());
}

#[test]
fn test_rules_lists_three_rules() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["rules"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("brute_force"));
    assert!(out.contains("scanning"));
    assert!(out.contains("dos"));
}

#[test]
fn test_analyze_without_sources_exits_three() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["analyze"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("--web and/or --auth"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_analyze_auth_log_prints_alert_table() {
    // Given: An auth log with five failures from one IP
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("auth.log"), AUTH_LOG).expect("should write log");

    // When: Analyzing it
    let output = logwarden(
        temp_dir.path(),
        &["analyze", "--auth", "auth.log", "--year", "2024"],
    );

    // Then: One brute force alert in the table
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("SSH Brute Force"));
    assert!(out.contains("203.0.113.9"));
    assert!(out.contains("2024-01-10 06:30:00"));
    assert!(out.contains("5 failed logins within 5 min"));
}

#[test]
fn test_analyze_json_and_fail_on_alert() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("auth.log"), AUTH_LOG).expect("should write log");
    fs::write(temp_dir.path().join("bad.txt"), "203.0.113.9\n").expect("should write list");

    let output = logwarden(
        temp_dir.path(),
        &[
            "analyze",
            "--auth",
            "auth.log",
            "--year",
            "2024",
            "--blacklist",
            "bad.txt",
            "--fail-on-alert",
            "--output",
            "json",
        ],
    );

    assert_eq!(output.status.code(), Some(4));
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["alerts"][0]["blacklisted"], true);
    assert_eq!(json["auth_year"], 2024);
}

#[test]
fn test_analyze_export_writes_csv() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("auth.log"), AUTH_LOG).expect("should write log");

    let output = logwarden(
        temp_dir.path(),
        &["analyze", "--auth", "auth.log", "--year", "2024", "--export", "out"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let entries: Vec<_> = fs::read_dir(temp_dir.path().join("out"))
        .expect("export dir should exist")
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(stdout(&output).contains("Exported:"));
}

#[test]
fn test_analyze_missing_log_exits_ten() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = logwarden(temp_dir.path(), &["analyze", "--web", "missing.log"]);

    assert_eq!(output.status.code(), Some(10));
    assert!(stderr(&output).contains("missing.log"));
}
