//! `devicefarm validate` — load the config and flatten every pool.
//!
//! Also parses every flattened descriptor, so a typo in any pool is caught
//! without contacting Device Farm.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::domain::{FlatPoolDefinitions, RepoConfig, flatten, parse_descriptors};

/// Flatten and parse every pool of `config`.
///
/// # Errors
///
/// Returns the first pool or descriptor error.
pub fn check_pools(config: &RepoConfig) -> Result<FlatPoolDefinitions> {
    let flat = flatten(&config.devicepools)?;
    for (name, items) in &flat {
        parse_descriptors(items).with_context(|| format!("device pool `{name}`"))?;
    }
    Ok(flat)
}

/// # Errors
///
/// Returns an error if the config cannot be loaded or any pool is invalid.
pub fn run(app: &AppContext) -> Result<()> {
    let config = app.config.load()?;
    let flat = check_pools(&config)?;
    if let Some(pool) = &config.defaults.devicepool
        && !flat.contains_key(pool)
    {
        anyhow::bail!("defaults.devicepool `{pool}` is not a defined device pool");
    }
    for (branch, manifest) in &config.branches {
        if let Some(pool) = &manifest.devicepool
            && !flat.contains_key(pool)
        {
            anyhow::bail!("branches.{branch}.devicepool `{pool}` is not a defined device pool");
        }
    }
    app.renderer().render_validation(app.config.path(), &flat)
}
