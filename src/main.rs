//! Nestscan CLI entry point

use clap::Parser;
use nestscan::cli::{Cli, Commands};
use nestscan::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("NESTSCAN_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cycles(args) => nestscan::cli::cycles::run(args),
        Commands::Cull(args) => nestscan::cli::cull::run(args),
        Commands::Merge(args) => nestscan::cli::merge::run(args),
    }
}
