//! Schemalift CLI - initialize and upgrade database schemas from versioned SQL scripts

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{apply, status};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        Commands::Init => apply::execute(apply::Operation::InitializeEmpty, &cli.global),
        Commands::Update => apply::execute(apply::Operation::UpdateExisting, &cli.global),
        Commands::Migrate => apply::execute(apply::Operation::InitializeOrUpdate, &cli.global),
        Commands::Status(args) => status::execute(args, &cli.global),
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();
}
