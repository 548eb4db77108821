//! dotrc - Shell Dotfile Manager

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dotrc::cli::{commands, Cli, Context};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dotrc=debug")
    } else {
        EnvFilter::try_from_env("DOTRC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::from_cli(&cli)?;
    commands::execute(&ctx, &cli.command)
}
