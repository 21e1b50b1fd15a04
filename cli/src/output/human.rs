//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::pool_sync::PoolSync;
use crate::application::services::test_run::RunOutcome;
use crate::domain::{Device, FlatPoolDefinitions, descriptor_for};
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        println!("devicefarm {version}");
    }

    pub fn render_validation(&self, path: &Path, pools: &FlatPoolDefinitions) {
        self.ctx.success(&format!(
            "{} is valid ({} device pool{})",
            path.display(),
            pools.len(),
            if pools.len() == 1 { "" } else { "s" }
        ));
    }

    /// Every pool with its flattened descriptors. This is the command's
    /// payload, so it prints even when quiet.
    pub fn render_pools(&self, pools: &FlatPoolDefinitions) {
        for (name, items) in pools {
            println!("{}", format!("{name}:").style(self.ctx.styles.header));
            for item in items {
                println!("  - {item}");
            }
        }
    }

    pub fn render_pool_sync(&self, sync: &PoolSync) {
        let styles = &self.ctx.styles;
        self.ctx.kv("Device pool:", &sync.pool.name);
        self.ctx.kv("ARN:", &sync.pool.arn.style(styles.arn).to_string());
        self.ctx.kv("Devices:", &sync.device_count.to_string());
        self.ctx.kv(
            "Action:",
            &sync
                .action
                .as_str()
                .style(styles.sync_action(sync.action))
                .to_string(),
        );
    }

    /// One descriptor line per device, ready to paste into `devicepools`.
    pub fn render_devices(&self, devices: &[Device]) {
        if devices.is_empty() {
            self.ctx.warn("no matching devices");
            return;
        }
        for device in devices {
            match descriptor_for(device) {
                Some(line) => println!("{line}"),
                None => self
                    .ctx
                    .warn(&format!("skipping {}: malformed ARN {}", device.name, device.arn)),
            }
        }
    }

    pub fn render_run(&self, outcome: &RunOutcome) {
        self.ctx.kv("Branch:", &outcome.branch);
        self.ctx.kv("Device pool:", &outcome.devicepool);
        self.ctx.kv(
            "Pool ARN:",
            &outcome.device_pool_arn.style(self.ctx.styles.arn).to_string(),
        );
        println!("{}", outcome.run_arn);
    }
}
