//! Lint command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use miette::{IntoDiagnostic, Result};
use suitelint_core::{Linter, RunSummary};
use tracing::info;

pub fn run_lint(mut linter: Linter) -> Result<ExitCode> {
    if linter.config().paths.is_empty() {
        println!("No path has been provided");
        return Ok(ExitCode::SUCCESS);
    }

    let summary = match linter.config().output.clone() {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            let summary = run_to(&mut linter, &mut writer)?;
            writer.flush().into_diagnostic()?;
            info!("Results written to {}", path.display());
            summary
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            run_to(&mut linter, &mut handle)?
        }
    };

    Ok(summary
        .exit_status
        .map(ExitCode::from)
        .unwrap_or(ExitCode::SUCCESS))
}

fn run_to(linter: &mut Linter, out: &mut dyn Write) -> Result<RunSummary> {
    let summary = linter.run(out).into_diagnostic()?;
    info!(
        "Checked {} files, found {} issues",
        summary.files, summary.findings
    );
    Ok(summary)
}
