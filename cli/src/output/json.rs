//! JSON output helpers.
//!
//! `JsonRenderer` prints one pretty-printed JSON document per command on
//! stdout; `format_error` builds the error object used when a command fails
//! in `--json` mode.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::services::pool_sync::PoolSync;
use crate::application::services::test_run::RunOutcome;
use crate::domain::{Device, FlatPoolDefinitions, descriptor_for};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stateless JSON renderer.
pub struct JsonRenderer;

#[allow(clippy::unused_self)] // methods mirror `HumanRenderer`
impl JsonRenderer {
    fn print(value: &Value) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_validation(&self, path: &Path, pools: &FlatPoolDefinitions) -> Result<()> {
        Self::print(&json!({
            "valid": true,
            "config": path.display().to_string(),
            "devicepools": pools,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_pools(&self, pools: &FlatPoolDefinitions) -> Result<()> {
        Self::print(&json!({ "devicepools": pools }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_pool_sync(&self, sync: &PoolSync) -> Result<()> {
        Self::print(&json!({
            "name": sync.pool.name,
            "arn": sync.pool.arn,
            "action": sync.action.as_str(),
            "devices": sync.device_count,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_devices(&self, devices: &[Device]) -> Result<()> {
        let rows: Vec<Value> = devices
            .iter()
            .map(|d| {
                json!({
                    "name": d.name,
                    "platform": d.platform,
                    "arn": d.arn,
                    "descriptor": descriptor_for(d),
                })
            })
            .collect();
        Self::print(&Value::Array(rows))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_run(&self, outcome: &RunOutcome) -> Result<()> {
        Self::print(&json!({
            "branch": outcome.branch,
            "devicepool": outcome.devicepool,
            "devicepool_arn": outcome.device_pool_arn,
            "run_arn": outcome.run_arn,
        }))
    }
}
