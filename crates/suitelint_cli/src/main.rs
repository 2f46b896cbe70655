//! suitelint CLI
//!
//! Static analysis for plain-text test suite files.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match commands::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}
