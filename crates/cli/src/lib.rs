//! The `skillport` command-line tool.
//!
//! Wraps [`skillport_convert`] with file discovery, configuration, logging
//! and reporting. The conversion core stays pure; everything that touches
//! the filesystem or the terminal lives here.

pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

/// Parses arguments and runs the selected command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    config::apply_config_to_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => commands::convert::run(&args),
    }
}
