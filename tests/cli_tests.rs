//! CLI Integration Tests for usergate
//!
//! Runs the built `usergate-server` binary for the help output, the init
//! command and the config command.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run usergate-server with arguments
fn run_usergate(args: &[&str], working_dir: &Path, env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_usergate-server"))
        .args(args)
        .arg("--no-color")
        .current_dir(working_dir)
        .env_remove("RUST_LOG")
        .envs(env.iter().copied())
        .output()
        .expect("Failed to execute command")
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_usergate(&["--help"], dir.path(), &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usergate"));
    assert!(stdout.contains("init"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_usergate(&["--version"], dir.path(), &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usergate-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Init Command Tests
// =============================================================================

#[test]
fn test_init_scaffolds_project() {
    let dir = TempDir::new().unwrap();
    let output = run_usergate(&["init", "--port", "4100"], dir.path(), &[]);

    assert!(output.status.success(), "Init command failed: {:?}", output);

    let toml = fs::read_to_string(dir.path().join("usergate.toml")).unwrap();
    assert!(toml.contains("[server]"));
    assert!(toml.contains("port = 4100"));
    assert!(toml.contains("[auth]"));
    assert!(toml.contains("[database]"));

    let env = fs::read_to_string(dir.path().join(".env.example")).unwrap();
    assert!(env.contains("JWT_SECRET"));
    assert!(dir.path().join("data").is_dir());
    assert!(dir.path().join(".gitignore").is_file());
}

#[test]
fn test_init_twice_keeps_existing_config() {
    let dir = TempDir::new().unwrap();
    assert!(run_usergate(&["init"], dir.path(), &[]).status.success());
    fs::write(dir.path().join("usergate.toml"), "# edited\n").unwrap();

    let output = run_usergate(&["init"], dir.path(), &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("already exists"));
    assert_eq!(
        fs::read_to_string(dir.path().join("usergate.toml")).unwrap(),
        "# edited\n"
    );
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_validate_accepts_long_secret() {
    let dir = TempDir::new().unwrap();
    assert!(run_usergate(&["init"], dir.path(), &[]).status.success());

    let output = run_usergate(
        &["config", "--validate"],
        dir.path(),
        &[("JWT_SECRET", "a-signing-secret-that-is-definitely-long-enough")],
    );

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(!stdout.contains("definitely-long-enough"));
}

#[test]
fn test_config_validate_rejects_short_secret() {
    let dir = TempDir::new().unwrap();
    assert!(run_usergate(&["init"], dir.path(), &[]).status.success());

    let output = run_usergate(
        &["config", "--validate"],
        dir.path(),
        &[("JWT_SECRET", "short")],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least 32"));
}

#[test]
fn test_config_missing_file() {
    let dir = TempDir::new().unwrap();

    let output = run_usergate(&["config", "-c", "missing.toml"], dir.path(), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.toml"));
}

#[test]
fn test_server_refuses_to_start_without_secret() {
    let dir = TempDir::new().unwrap();
    assert!(run_usergate(&["init"], dir.path(), &[]).status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_usergate-server"))
        .arg("--no-color")
        .current_dir(dir.path())
        .env_remove("JWT_SECRET")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("JWT_SECRET"));
}
