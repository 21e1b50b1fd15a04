//! Shared test helpers: process outputs, fixtures and config builders.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};

use devicefarm_cli::domain::{Device, DevicePlatform, PoolDefinitions, PoolRule, RemotePool};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const PROJECT_ARN: &str = "arn:aws:devicefarm:us-west-2:123456789012:project:abc";

pub fn device_arn(resource: &str) -> String {
    format!("arn:aws:devicefarm:us-west-2::{resource}")
}

pub fn defs(pools: &[(&str, &[&str])]) -> PoolDefinitions {
    pools
        .iter()
        .map(|(name, items)| {
            (
                (*name).to_string(),
                items.iter().map(|i| (*i).to_string()).collect(),
            )
        })
        .collect()
}

pub fn remote_pool(arn: &str, name: &str, value: &str) -> RemotePool {
    RemotePool {
        arn: arn.to_string(),
        name: name.to_string(),
        rules: vec![PoolRule::arn_in(value.to_string())],
    }
}

pub fn device(name: &str, platform: DevicePlatform, resource: &str) -> Device {
    Device {
        name: name.to_string(),
        platform,
        arn: device_arn(resource),
    }
}
