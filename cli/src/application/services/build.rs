//! Application service — local git branch detection and build steps.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::BuildError;

/// Upper bound for a single build step.
pub const BUILD_STEP_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Name of the branch checked out in `dir`.
///
/// # Errors
///
/// Returns [`BuildError::Detached`] when `HEAD` is not on a branch, or an
/// error if git cannot be run or fails.
pub async fn current_branch(runner: &impl CommandRunner, dir: &Path) -> Result<String> {
    let output = runner
        .run(dir, "git", &["rev-parse", "--abbrev-ref", "HEAD"])
        .await
        .context("running git")?;
    if !output.status.success() {
        anyhow::bail!(
            "git rev-parse failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch == "HEAD" {
        return Err(BuildError::Detached.into());
    }
    tracing::debug!(%branch, "detected branch");
    Ok(branch)
}

/// Run each step through `sh -c` in `dir`, stopping at the first failure.
///
/// # Errors
///
/// Returns [`BuildError::StepFailed`] for the first step that exits
/// non-zero, or an error if a step cannot be spawned or times out.
pub async fn run_build_steps(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    dir: &Path,
    steps: &[String],
) -> Result<()> {
    for step in steps {
        reporter.step(&format!("$ {step}"));
        let output = runner
            .run_with_timeout(dir, "sh", &["-c", step], BUILD_STEP_TIMEOUT)
            .await
            .with_context(|| format!("running build step `{step}`"))?;
        if !output.status.success() {
            return Err(BuildError::StepFailed {
                step: step.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }
    }
    if !steps.is_empty() {
        reporter.success("build finished");
    }
    Ok(())
}
