//! # logdemux CLI
//!
//! Entry point for the demultiplexing sidecar binary.
//!
//! Wires the composition root: observability init, a session registry over
//! the FIFO stream factory, and the command surface.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::run_forward;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_observability(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "logdemux starting");

    let result = match &cli.command {
        Commands::Forward(args) => run_forward(args).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "command failed");
    }

    result
}

fn init_observability(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    };

    let metrics_port = match &cli.command {
        Commands::Forward(args) => args.metrics_port,
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port,
        default_log_level,
    })
}
