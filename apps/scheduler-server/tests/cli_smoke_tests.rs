//! CLI smoke tests for the scheduler-server binary: help/version output,
//! configuration validation, and the check subcommand.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run the scheduler-server binary with the given arguments
fn run_scheduler_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_scheduler-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute scheduler-server")
}

#[test]
fn help_lists_subcommands_and_options() {
    let output = run_scheduler_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scheduler-server") || stdout.contains("Scheduler"));
    assert!(stdout.contains("Usage:") || stdout.contains("USAGE:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--mock"));
}

#[test]
fn version_is_printed() {
    let output = run_scheduler_server(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn check_succeeds_with_a_valid_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "server:\n  host: 127.0.0.1\n  port: 9099\ndatabase:\n  url: sqlite://test.db?mode=rwc\n"
    )
    .expect("write config");

    let path = file.path().to_string_lossy().to_string();
    let output = run_scheduler_server(&["--config", &path, "check"]);

    assert!(
        output.status.success(),
        "check should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("9099"));
}

#[test]
fn check_fails_for_a_missing_config_file() {
    let output = run_scheduler_server(&["--config", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn check_fails_for_unknown_config_keys() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "server:\n  host: 127.0.0.1\n  port: 9099\n  bogus: 1\n").expect("write config");

    let path = file.path().to_string_lossy().to_string();
    let output = run_scheduler_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
}

#[test]
fn print_config_dumps_effective_configuration() {
    let output = run_scheduler_server(&["--print-config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Stdout is the YAML document alone, with no startup log lines mixed in.
    assert!(stdout.trim_start().starts_with("server:"));
    assert!(stdout.contains("host:"));
    assert!(!stdout.contains("Scheduler Server starting"));
}
