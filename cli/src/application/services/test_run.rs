//! Application service — upload test artifacts and schedule a run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{ArtifactTransfer, DeviceFarmApi, ProgressReporter};
use crate::application::services::upload::{WaitPolicy, create_upload, wait_for_uploads};
use crate::domain::{RunRequest, TestSpec};

/// Inputs of [`schedule_run`].
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRequest<'a> {
    pub project_arn: &'a str,
    pub device_pool_arn: &'a str,
    pub test: &'a TestSpec,
    /// Relative artifact paths in `test` are resolved against this directory.
    pub base_dir: &'a Path,
    pub policy: WaitPolicy,
}

/// Summary of a scheduled run, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub branch: String,
    pub devicepool: String,
    pub device_pool_arn: String,
    pub run_arn: String,
}

/// Upload the app and test package, wait for both, and schedule the run.
///
/// Returns the run ARN.
///
/// # Errors
///
/// Returns the first upload, wait or scheduling error. Uploads created
/// before a failure are left in place.
pub async fn schedule_run(
    api: &impl DeviceFarmApi,
    transfer: &impl ArtifactTransfer,
    reporter: &impl ProgressReporter,
    request: ScheduleRequest<'_>,
) -> Result<String> {
    let [app, package] = request.test.uploads();

    reporter.step(&format!("uploading {}", app.path.display()));
    let app_arn = create_upload(
        api,
        transfer,
        request.project_arn,
        &request.base_dir.join(app.path),
        app.kind,
        app.name,
    )
    .await?;

    reporter.step(&format!("uploading {}", package.path.display()));
    let test_package_arn = create_upload(
        api,
        transfer,
        request.project_arn,
        &request.base_dir.join(package.path),
        package.kind,
        package.name,
    )
    .await?;

    reporter.step("waiting for uploads to be processed");
    wait_for_uploads(
        api,
        &[app_arn.clone(), test_package_arn.clone()],
        request.policy,
    )
    .await?;
    reporter.success("uploads processed");

    let run = RunRequest {
        project_arn: request.project_arn.to_string(),
        device_pool_arn: request.device_pool_arn.to_string(),
        app_arn,
        test_type: request.test.test_type(),
        test_package_arn,
    };
    let run_arn = api.schedule_run(&run).await.context("scheduling run")?;
    tracing::info!(%run_arn, test_type = run.test_type.as_str(), "run scheduled");
    reporter.success(&format!("run scheduled: {run_arn}"));
    Ok(run_arn)
}
