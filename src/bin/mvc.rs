//! MiniVC CLI Binary
//!
//! Command-line interface for the MiniVC version tracker.

use anyhow::Context;
use clap::Parser;
use minivc::logging::init_logging;
use minivc::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = CliContext::resolve_config(cli).context("loading configuration")?;
    init_logging(Some(&config.logging)).context("initializing logging")?;

    let context = CliContext::new(cli.workspace.clone(), config)
        .context("initializing workspace")?
        .with_assume_yes(cli.yes);

    let output = context.execute(&cli.command)?;
    Ok(output)
}
