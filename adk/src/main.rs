//! `adk` command-line entry point.
//!
//! Parses arguments, initializes logging, and runs one component operation.
//! Any failure is printed as a single `Error: ...` line on stderr.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use adk::cli::{self, Cli};

async fn run(cli: Cli) -> Result<()> {
    cli::execute(cli).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the confirmation line
    let log_level = if cli.verbose { "adk=debug" } else { "adk=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
