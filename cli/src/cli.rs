//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::domain::config::DEFAULT_CONFIG_FILE;

/// Keep AWS Device Farm pools in sync with your repo and schedule test runs
#[derive(Parser)]
#[command(
    name = "devicefarm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the repository config
    #[arg(long, global = true, env = "DEVICEFARM_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the config and flatten every device pool
    Validate,

    /// Inspect and sync device pools
    #[command(subcommand)]
    Pools(commands::pools::PoolsCommand),

    /// List Device Farm devices as pool entries
    Devices(commands::devices::DevicesArgs),

    /// Build, sync the branch's pool, upload and schedule a run
    Run(commands::run::RunArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(
            &OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        );
        let result = match command {
            Command::Validate => commands::validate::run(&app),
            Command::Pools(cmd) => commands::pools::run(&app, cmd).await,
            Command::Devices(args) => commands::devices::run(&app, &args).await,
            Command::Run(args) => commands::run::run(&app, &args).await,
            Command::Version => commands::version::run(&app),
        };
        result.map_err(|e| commands::report_error(&app, e))
    }
}
