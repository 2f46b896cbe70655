//! # suitelint_core
//!
//! Core linter engine for suitelint.
//!
//! This crate provides:
//! - The main `Linter` orchestrator and its scan strategies
//! - Checkers, rules and the registry that detects rule conflicts
//! - Classification of files by naming convention and imports
//! - In-source disabler directives
//! - Configuration loading and file discovery
//! - Run-wide reports
//!
//! ## Example
//!
//! ```rust,ignore
//! use suitelint_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".suitelint.jsonc")?;
//! let mut linter = Linter::new(config)?;
//!
//! let summary = linter.run(&mut std::io::stdout())?;
//! println!("{} issues in {} files", summary.findings, summary.files);
//! ```

mod checker;
pub mod checkers;
mod classifier;
mod config;
pub mod disabler;
mod error;
pub mod file_finder;
mod finding;
mod linter;
mod registry;
pub mod reports;
mod rule;

pub use checker::{Checker, ScanContext, ScanPass};
pub use classifier::{Classification, FileClassifier, FileRecord};
pub use config::{CONFIG_FILE_NAMES, LinterConfig, ScanStrategy};
pub use disabler::{Disablers, FileDisableMode};
pub use error::LinterError;
pub use finding::{DEFAULT_FORMAT, Finding};
pub use linter::{Linter, RunSummary};
pub use registry::Registry;
pub use reports::{Report, ReportSet};
pub use rule::{
    ParamParser, ParamValue, Rule, RuleParam, RuleSet, Severity, parse_int, parse_str,
};

pub use suitelint_parser::FileType;
