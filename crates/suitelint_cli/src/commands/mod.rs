//! Command implementations

mod lint;
mod rules;

use std::process::ExitCode;

use miette::{IntoDiagnostic, Result};
use suitelint_core::{Linter, LinterConfig};
use tracing::info;

use crate::cli::Cli;

/// Runs the linter as configured by the config file and `cli`.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let linter = Linter::new(config).into_diagnostic()?;

    if linter.config().list {
        rules::list_rules(&linter);
        return Ok(ExitCode::SUCCESS);
    }
    if cli.list_reports {
        rules::list_reports(&linter);
        return Ok(ExitCode::SUCCESS);
    }
    lint::run_lint(linter)
}

fn load_config(cli: &Cli) -> Result<LinterConfig> {
    let mut config = if let Some(ref path) = cli.config {
        LinterConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };
    cli.apply(&mut config);
    Ok(config)
}

fn find_config() -> Result<LinterConfig> {
    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
