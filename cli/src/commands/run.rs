//! `devicefarm run` — build, sync the branch's pool, upload and schedule.
//!
//! Every config check happens before the build starts; every remote call
//! happens after it succeeds.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::build::run_build_steps;
use crate::application::services::pool_sync::sync_pool;
use crate::application::services::test_run::{RunOutcome, ScheduleRequest, schedule_run};
use crate::application::services::upload::WaitPolicy;
use crate::commands::pools::{membership_check, resolve_branch};
use crate::commands::validate::check_pools;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::http_transfer::HttpTransfer;
use crate::output::TerminalReporter;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Branch whose manifest to use (default: the checked-out branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Upload existing artifacts without running the build steps
    #[arg(long)]
    pub skip_build: bool,

    /// Treat a pool with the same devices in another order as unchanged
    #[arg(long)]
    pub ignore_order: bool,

    /// Credentials file used when the AWS_* variables are not set
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,
}

/// Entry point for `devicefarm run`.
///
/// # Errors
///
/// Returns the first config, build, upload or remote error.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<()> {
    let config = app.config.load()?;
    check_pools(&config)?;
    let repo_dir = app.config.base_dir();
    let branch = resolve_branch(app, args.branch.as_deref()).await?;
    let manifest = config.branch_manifest(&branch).runnable(&branch)?;
    tracing::info!(%branch, devicepool = %manifest.devicepool, "starting run");

    let reporter = TerminalReporter::new(&app.output);
    if args.skip_build {
        reporter.warn("--skip-build: using existing artifacts");
    } else {
        run_build_steps(
            &TokioCommandRunner::default(),
            &reporter,
            &repo_dir,
            &manifest.steps,
        )
        .await?;
    }

    let api = app.device_farm(args.credentials.as_deref())?;
    let synced = sync_pool(
        &api,
        &reporter,
        &config.devicepools,
        &config.project_arn,
        &branch,
        &manifest.devicepool,
        membership_check(args.ignore_order),
    )
    .await?;

    let run_arn = schedule_run(
        &api,
        &HttpTransfer::default(),
        &reporter,
        ScheduleRequest {
            project_arn: &config.project_arn,
            device_pool_arn: &synced.pool.arn,
            test: &manifest.test,
            base_dir: &repo_dir,
            policy: WaitPolicy::from(config.uploads),
        },
    )
    .await?;

    app.renderer().render_run(&RunOutcome {
        branch,
        devicepool: manifest.devicepool,
        device_pool_arn: synced.pool.arn,
        run_arn,
    })
}
