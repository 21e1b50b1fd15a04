//! Application service — reconcile a configured device pool with Device Farm.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{DeviceFarmApi, ProgressReporter};
use crate::domain::{
    MembershipCheck, PoolDefinitions, PoolPlan, RemotePool, flatten_pool, parse_descriptors,
    plan_pool, remote_pool_name,
};

/// What `reconcile_pool` did to the remote pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
}

impl SyncAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Outcome of `sync_pool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSync {
    pub pool: RemotePool,
    pub action: SyncAction,
    pub device_count: usize,
}

/// Device ARNs of the pool named `pool`, in flattened (sorted) order.
///
/// # Errors
///
/// Returns the pool error if any definition is invalid, or the descriptor
/// error for the first malformed item of `pool`.
pub fn desired_device_arns(defs: &PoolDefinitions, pool: &str) -> Result<Vec<String>> {
    let items = flatten_pool(defs, pool)?;
    let arns = parse_descriptors(&items)?;
    Ok(arns.iter().map(ToString::to_string).collect())
}

/// Bring the remote pool for `branch`/`pool` in line with `device_arns`.
///
/// `remote_pools` must be the project's complete pool listing.
///
/// # Errors
///
/// Returns the remote error from the create or update call unchanged.
pub async fn reconcile_pool(
    api: &impl DeviceFarmApi,
    remote_pools: &[RemotePool],
    project_arn: &str,
    branch: &str,
    pool: &str,
    device_arns: &[String],
    check: MembershipCheck,
) -> Result<(RemotePool, SyncAction)> {
    let name = remote_pool_name(branch, pool);
    match plan_pool(remote_pools, &name, device_arns, check) {
        PoolPlan::Create { name, rule } => {
            tracing::info!(%name, devices = device_arns.len(), "creating device pool");
            let created = api
                .create_device_pool(project_arn, &name, &rule)
                .await
                .with_context(|| format!("creating device pool {name}"))?;
            Ok((created, SyncAction::Created))
        }
        PoolPlan::Update { pool, rule } => {
            tracing::info!(name = %pool.name, arn = %pool.arn, "updating device pool");
            let updated = api
                .update_device_pool(&pool.arn, &pool.name, &rule)
                .await
                .with_context(|| format!("updating device pool {}", pool.name))?;
            Ok((updated, SyncAction::Updated))
        }
        PoolPlan::Keep(pool) => {
            tracing::debug!(name = %pool.name, "device pool up to date");
            Ok((pool, SyncAction::Unchanged))
        }
    }
}

/// Resolve `pool` from `defs`, fetch the project's pools and reconcile.
///
/// Definitions are validated before any remote call is made.
///
/// # Errors
///
/// Returns configuration errors first, then any remote error.
pub async fn sync_pool(
    api: &impl DeviceFarmApi,
    reporter: &impl ProgressReporter,
    defs: &PoolDefinitions,
    project_arn: &str,
    branch: &str,
    pool: &str,
    check: MembershipCheck,
) -> Result<PoolSync> {
    let device_arns = desired_device_arns(defs, pool)?;
    reporter.step(&format!("syncing device pool {}", remote_pool_name(branch, pool)));
    let remote_pools = api
        .list_device_pools(project_arn)
        .await
        .context("listing device pools")?;
    let (remote, action) = reconcile_pool(
        api,
        &remote_pools,
        project_arn,
        branch,
        pool,
        &device_arns,
        check,
    )
    .await?;
    reporter.success(&format!("device pool {} {}", remote.name, action.as_str()));
    Ok(PoolSync {
        pool: remote,
        action,
        device_count: device_arns.len(),
    })
}
