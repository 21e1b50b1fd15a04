//! Application service — artifact uploads and waiting for them to be processed.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;

use crate::application::ports::{ArtifactTransfer, DeviceFarmApi};
use crate::domain::{UploadError, UploadKind, UploadSettings, UploadStatus};

/// Result of a single status check on an upload that has not failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadProgress {
    Pending,
    Succeeded,
}

/// How long to wait for uploads, and how often to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub delay: Duration,
}

impl From<UploadSettings> for WaitPolicy {
    fn from(settings: UploadSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            delay: settings.poll_interval(),
        }
    }
}

/// Create an upload and transfer the file at `path` to it.
///
/// The whole file is read before the upload is created, so a missing file
/// never leaves an orphaned upload behind.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the upload cannot be
/// created, or the transfer fails. Nothing is retried.
pub async fn create_upload(
    api: &impl DeviceFarmApi,
    transfer: &impl ArtifactTransfer,
    project_arn: &str,
    path: &Path,
    kind: UploadKind,
    name: &str,
) -> Result<String> {
    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let slot = api
        .create_upload(project_arn, name, kind)
        .await
        .with_context(|| format!("creating {kind} upload for {}", path.display()))?;
    tracing::info!(arn = %slot.arn, %kind, bytes = body.len(), "upload created");
    transfer
        .put(&slot.url, body)
        .await
        .with_context(|| format!("transferring {}", path.display()))?;
    Ok(slot.arn)
}

/// Check an upload once.
///
/// # Errors
///
/// Returns [`UploadError::Failed`] if the upload reached the failed state, or
/// the remote error if the status could not be read.
pub async fn poll_status(api: &impl DeviceFarmApi, upload_arn: &str) -> Result<UploadProgress> {
    let status = api.get_upload(upload_arn).await?;
    tracing::debug!(arn = upload_arn, ?status, "polled upload");
    match status {
        UploadStatus::Succeeded => Ok(UploadProgress::Succeeded),
        UploadStatus::Failed => Err(UploadError::Failed {
            arn: upload_arn.to_string(),
        }
        .into()),
        UploadStatus::Initialized | UploadStatus::Processing => Ok(UploadProgress::Pending),
    }
}

/// Wait until every upload in `upload_arns` has succeeded.
///
/// Each pass polls the still-pending uploads in order; a pass that leaves
/// uploads pending is followed by `policy.delay`. The loop runs under a
/// `policy.timeout` deadline, which is also checked before every poll: once
/// it has passed no further poll is issued, even if status checks complete
/// without yielding.
///
/// # Errors
///
/// - [`UploadError::Failed`] as soon as any upload fails.
/// - [`UploadError::TimedOut`] if uploads are still pending at the deadline.
/// - Any remote error from a status check.
pub async fn wait_for_uploads(
    api: &impl DeviceFarmApi,
    upload_arns: &[String],
    policy: WaitPolicy,
) -> Result<()> {
    let deadline = Instant::now() + policy.timeout;
    match tokio::time::timeout_at(deadline, poll_until_done(api, upload_arns, policy, deadline))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(timed_out(policy).into()),
    }
}

fn timed_out(policy: WaitPolicy) -> UploadError {
    UploadError::TimedOut {
        after: policy.timeout,
    }
}

async fn poll_until_done(
    api: &impl DeviceFarmApi,
    upload_arns: &[String],
    policy: WaitPolicy,
    deadline: Instant,
) -> Result<()> {
    let mut pending: Vec<&str> = upload_arns.iter().map(String::as_str).collect();
    while !pending.is_empty() {
        let mut still_pending = Vec::with_capacity(pending.len());
        for arn in pending {
            if Instant::now() >= deadline {
                return Err(timed_out(policy).into());
            }
            if poll_status(api, arn).await? == UploadProgress::Pending {
                still_pending.push(arn);
            }
        }
        pending = still_pending;
        if pending.is_empty() {
            break;
        }
        if policy.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(policy.delay).await;
        }
    }
    Ok(())
}
