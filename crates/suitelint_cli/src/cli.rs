//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use suitelint_core::{LinterConfig, ScanStrategy, Severity};

/// suitelint - Static analysis for plain-text test suite files
#[derive(Parser, Debug)]
#[command(name = "suitelint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to lint
    pub paths: Vec<PathBuf>,

    /// Run only these rules (ids or names, comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip these rules (ids or names, comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Minimum severity of rules to run (E, W or I)
    #[arg(short, long)]
    pub threshold: Option<Severity>,

    /// Configure a rule or report: <name>:<param>:<value>
    #[arg(short, long, value_name = "DIRECTIVE")]
    pub configure: Vec<String>,

    /// Reports to generate (comma separated, `all` for every report)
    #[arg(short, long, value_delimiter = ',')]
    pub reports: Vec<String>,

    /// Per-issue output template
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write issues and reports to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Accepted file extensions (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub filetypes: Vec<String>,

    /// Glob patterns of paths to skip
    #[arg(long, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// List all rules and exit
    #[arg(short, long)]
    pub list: bool,

    /// List all reports and exit
    #[arg(long)]
    pub list_reports: bool,

    /// Classify all files first, then scan them in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overrides `config` with the flags given on the command line.
    pub fn apply(&self, config: &mut LinterConfig) {
        if !self.paths.is_empty() {
            config.paths = self.paths.clone();
        }
        if !self.include.is_empty() {
            config.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.configure.extend(self.configure.iter().cloned());
        if !self.reports.is_empty() {
            config.reports = self.reports.clone();
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if !self.filetypes.is_empty() {
            config.filetypes = self.filetypes.clone();
        }
        config.ignore.extend(self.ignore.iter().cloned());
        if self.no_recursive {
            config.recursive = false;
        }
        if self.list {
            config.list = true;
        }
        if self.parallel {
            config.strategy = ScanStrategy::Parallel;
        }
    }
}
