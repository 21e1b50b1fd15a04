//! Integration tests for the devicefarm CLI surface
//!
//! These tests verify the command tree, global flags and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn devicefarm() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devicefarm"));
    cmd.env("NO_COLOR", "1").env_remove("DEVICEFARM_CONFIG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    devicefarm().assert().code(2).stderr(predicate::str::contains(
        "Keep AWS Device Farm pools in sync",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let assert = devicefarm().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for command in ["validate", "pools", "devices", "run", "version"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    devicefarm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devicefarm"));
}

#[test]
fn test_version_command_shows_version() {
    devicefarm()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "devicefarm ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = devicefarm().args(["--json", "version"]).assert().success();
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// --- Subcommand parsing tests ---

#[test]
fn test_pools_requires_subcommand() {
    devicefarm().arg("pools").assert().failure();
}

#[test]
fn test_pools_sync_help_shows_flags() {
    devicefarm()
        .args(["pools", "sync", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-order"))
        .stdout(predicate::str::contains("--branch"))
        .stdout(predicate::str::contains("--credentials"));
}

#[test]
fn test_run_help_shows_skip_build() {
    devicefarm()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-build"));
}

#[test]
fn test_devices_platform_flags_conflict() {
    devicefarm()
        .args(["devices", "--android", "--ios"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- Error handling tests ---

#[test]
fn test_unknown_command_exits_with_error() {
    devicefarm()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_missing_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    devicefarm()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot read devicefarm.yml"));
}
