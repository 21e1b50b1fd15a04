//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::time::Duration;

use thiserror::Error;

// ── Pool definition errors ────────────────────────────────────────────────────

/// Errors raised while flattening device pool definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("device pool `{0}` has no items")]
    Empty(String),

    #[error("device pool definition does not exist: {0}")]
    Missing(String),

    #[error("circular dependency in device pool `{pool}`: {}", .chain.join(" -> "))]
    Circular { pool: String, chain: Vec<String> },
}

// ── ARN errors ────────────────────────────────────────────────────────────────

/// Errors raised while parsing ARNs and device descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("invalid ARN: {0}")]
    Invalid(String),

    #[error("invalid device: {0}")]
    InvalidDevice(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to the repository config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("devicepools must have at least one pool")]
    NoPools,

    #[error("project_arn is not a valid ARN: {0}")]
    InvalidProject(String),

    #[error("uploads.{0} must be greater than zero")]
    ZeroUploadSetting(&'static str),

    #[error("branch '{branch}' is not runnable: `{field}` is not set in defaults or branches.{branch}")]
    NotRunnable { branch: String, field: &'static str },
}

// ── Upload errors ─────────────────────────────────────────────────────────────

/// Terminal outcomes of waiting for uploads, kept apart so callers can tell a
/// failed upload from an exhausted polling budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("upload failed: {arn}")]
    Failed { arn: String },

    #[error("timed out after {}s waiting for uploads to be processed", .after.as_secs())]
    TimedOut { after: Duration },
}

// ── Build errors ──────────────────────────────────────────────────────────────

/// Errors raised by the local build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("your repo looks like it is in a detached state")]
    Detached,

    #[error("build step `{step}` failed (exit code {code}){}", format_stderr(.stderr))]
    StepFailed {
        step: String,
        code: i32,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}
