//! `devicefarm pools` — show flattened pools or sync one with Device Farm.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::build::current_branch;
use crate::application::services::pool_sync::sync_pool;
use crate::commands::validate::check_pools;
use crate::domain::{ConfigError, MembershipCheck};
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::TerminalReporter;

#[derive(Subcommand)]
pub enum PoolsCommand {
    /// Print every pool with its flattened devices
    Show,
    /// Create or update the branch's device pool on Device Farm
    Sync(SyncArgs),
}

#[derive(Args)]
pub struct SyncArgs {
    /// Branch to sync for (default: the checked-out branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Treat a pool with the same devices in another order as unchanged
    #[arg(long)]
    pub ignore_order: bool,

    /// Credentials file used when the AWS_* variables are not set
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,
}

/// `--ignore-order` as a membership check.
#[must_use]
pub fn membership_check(ignore_order: bool) -> MembershipCheck {
    if ignore_order {
        MembershipCheck::SameSet
    } else {
        MembershipCheck::ExactRule
    }
}

/// Branch from `--branch`, or the one checked out next to the config.
///
/// # Errors
///
/// Returns an error if git fails or the repo is detached.
pub async fn resolve_branch(app: &AppContext, branch: Option<&str>) -> Result<String> {
    match branch {
        Some(b) => Ok(b.to_string()),
        None => {
            let runner = TokioCommandRunner::default();
            current_branch(&runner, &app.config.base_dir()).await
        }
    }
}

/// # Errors
///
/// Returns an error if the config is invalid or a remote call fails.
pub async fn run(app: &AppContext, cmd: PoolsCommand) -> Result<()> {
    match cmd {
        PoolsCommand::Show => {
            let config = app.config.load()?;
            let flat = check_pools(&config)?;
            app.renderer().render_pools(&flat)
        }
        PoolsCommand::Sync(args) => sync(app, &args).await,
    }
}

async fn sync(app: &AppContext, args: &SyncArgs) -> Result<()> {
    let config = app.config.load()?;
    check_pools(&config)?;
    let branch = resolve_branch(app, args.branch.as_deref()).await?;
    let pool = config
        .branch_manifest(&branch)
        .devicepool
        .ok_or_else(|| ConfigError::NotRunnable {
            branch: branch.clone(),
            field: "devicepool",
        })?;

    let api = app.device_farm(args.credentials.as_deref())?;
    let reporter = TerminalReporter::new(&app.output);
    let synced = sync_pool(
        &api,
        &reporter,
        &config.devicepools,
        &config.project_arn,
        &branch,
        &pool,
        membership_check(args.ignore_order),
    )
    .await?;
    app.renderer().render_pool_sync(&synced)
}
