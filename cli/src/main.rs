//! devicefarm CLI - keep AWS Device Farm pools in sync and schedule test runs

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use devicefarm_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "DEVICEFARM_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("devicefarm_cli=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
