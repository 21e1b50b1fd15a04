//! End-to-end tests for the commands that work on a config file:
//! `validate`, `pools show`, and the offline failure paths of `pools sync`
//! and `run`.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT_ARN: &str = "arn:aws:devicefarm:us-west-2:123456789012:project:abc";

fn devicefarm() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devicefarm"));
    cmd.env("NO_COLOR", "1")
        .env_remove("DEVICEFARM_CONFIG")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY");
    cmd
}

fn write_config(body: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("devicefarm.yml");
    std::fs::write(&path, format!("project_arn: {PROJECT_ARN}\n{body}")).expect("write config");
    (dir, path)
}

fn with_config(path: &Path) -> Command {
    let mut cmd = devicefarm();
    cmd.arg("--config").arg(path);
    cmd
}

const POOLS: &str = "\
devicepools:
  a_few_devices:
    - (arn=device:BBB) Google Pixel 5
    - (arn=device:AAA) Samsung Galaxy S3
  everything:
    - +a_few_devices
    - (arn=device:CCC) Apple iPhone 6S
    - (arn=device:AAA) Samsung Galaxy S3
defaults:
  devicepool: a_few_devices
";

// --- validate ---

#[test]
fn test_validate_accepts_valid_config() {
    let (_dir, path) = write_config(POOLS);
    with_config(&path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (2 device pools)"));
}

#[test]
fn test_validate_reads_config_from_env() {
    let (_dir, path) = write_config(POOLS);
    devicefarm()
        .env("DEVICEFARM_CONFIG", &path)
        .arg("validate")
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_circular_pools() {
    let (_dir, path) = write_config("devicepools:\n  a: ['+b']\n  b: ['+a']\n");
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("circular dependency in device pool `a`"))
        .stderr(predicate::str::contains("a -> b -> a"));
}

#[test]
fn test_validate_rejects_empty_pool() {
    let (_dir, path) = write_config("devicepools:\n  empty: []\n");
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("device pool `empty` has no items"));
}

#[test]
fn test_validate_rejects_missing_reference() {
    let (_dir, path) = write_config("devicepools:\n  a: ['+ghost']\n");
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "device pool definition does not exist: ghost",
        ));
}

#[test]
fn test_validate_rejects_malformed_descriptor() {
    let (_dir, path) = write_config("devicepools:\n  a: ['Google Pixel 5']\n");
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid device: Google Pixel 5"));
}

#[test]
fn test_validate_rejects_unknown_default_pool() {
    let (_dir, path) =
        write_config("devicepools:\n  a: ['(arn=device:A) A']\ndefaults:\n  devicepool: b\n");
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("defaults.devicepool `b`"));
}

#[test]
fn test_validate_rejects_zero_poll_interval() {
    let (_dir, path) = write_config(&format!("{POOLS}uploads:\n  poll_interval_secs: 0\n"));
    with_config(&path)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "uploads.poll_interval_secs must be greater than zero",
        ));
}

#[test]
fn test_validate_json_error_object() {
    let (_dir, path) = write_config("devicepools:\n  empty: []\n");
    let assert = with_config(&path)
        .args(["--json", "validate"])
        .assert()
        .code(1);
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(json["error"], true);
    assert_eq!(json["code"], "config");
    assert!(
        json["message"]
            .as_str()
            .expect("message")
            .contains("has no items")
    );
}

// --- pools show ---

#[test]
fn test_pools_show_prints_flattened_pools() {
    let (_dir, path) = write_config(POOLS);
    with_config(&path)
        .args(["pools", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "everything:\n  - (arn=device:AAA) Samsung Galaxy S3\n  - (arn=device:BBB) Google Pixel 5\n  - (arn=device:CCC) Apple iPhone 6S\n",
        ));
}

#[test]
fn test_pools_show_json() {
    let (_dir, path) = write_config(POOLS);
    let assert = with_config(&path)
        .args(["--json", "pools", "show"])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    let everything = json["devicepools"]["everything"]
        .as_array()
        .expect("array");
    assert_eq!(everything.len(), 3);
    assert_eq!(everything[0], "(arn=device:AAA) Samsung Galaxy S3");
}

// --- offline failures of remote commands ---

#[test]
fn test_pools_sync_without_credentials_fails_before_network() {
    let (dir, path) = write_config(POOLS);
    with_config(&path)
        .args(["pools", "sync", "--branch", "master", "--credentials"])
        .arg(dir.path().join("no-creds.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no credentials"))
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

#[test]
fn test_run_requires_test_in_manifest() {
    let (_dir, path) = write_config(POOLS);
    with_config(&path)
        .args(["run", "--branch", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("branch 'master' is not runnable"));
}

#[test]
fn test_run_stops_at_failing_build_step() {
    let (_dir, path) = write_config(&format!(
        "{POOLS}  build:\n    - exit 3\n  test:\n    type: instrumentation\n    app: app.apk\n    test_package: tests.apk\n"
    ));
    with_config(&path)
        .args(["run", "--branch", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("build step `exit 3` failed (exit code 3)"));
}
