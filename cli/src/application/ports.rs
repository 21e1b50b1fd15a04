//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{Device, PoolRule, RemotePool, RunRequest, UploadKind, UploadSlot, UploadStatus};

// ── Device Farm Port ──────────────────────────────────────────────────────────

/// The remote Device Farm service.
///
/// Every call is a single request: implementations must not retry, and
/// errors are returned to the caller unchanged.
#[allow(async_fn_in_trait)]
pub trait DeviceFarmApi {
    /// List every device Device Farm offers.
    async fn list_devices(&self) -> Result<Vec<Device>>;
    /// List the device pools of a project.
    async fn list_device_pools(&self, project_arn: &str) -> Result<Vec<RemotePool>>;
    /// Create a device pool holding exactly `rule`.
    async fn create_device_pool(
        &self,
        project_arn: &str,
        name: &str,
        rule: &PoolRule,
    ) -> Result<RemotePool>;
    /// Replace the rules of an existing pool with `rule`.
    async fn update_device_pool(
        &self,
        pool_arn: &str,
        name: &str,
        rule: &PoolRule,
    ) -> Result<RemotePool>;
    /// Reserve an upload and get the pre-signed URL for its bytes.
    async fn create_upload(
        &self,
        project_arn: &str,
        name: &str,
        kind: UploadKind,
    ) -> Result<UploadSlot>;
    /// Current processing status of an upload.
    async fn get_upload(&self, upload_arn: &str) -> Result<UploadStatus>;
    /// Schedule a run and return its ARN.
    async fn schedule_run(&self, request: &RunRequest) -> Result<String>;
}

// ── Artifact Transfer Port ────────────────────────────────────────────────────

/// Content type sent with every artifact PUT.
pub const ARTIFACT_CONTENT_TYPE: &str = "application/octet-stream";

/// Transfers artifact bytes to a pre-signed upload URL.
#[allow(async_fn_in_trait)]
pub trait ArtifactTransfer {
    /// PUT `body` to `url`. Non-2xx responses are errors.
    async fn put(&self, url: &str, body: Vec<u8>) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program in `dir` and capture its output.
    async fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
