//! Checker interface.

use std::path::Path;

use suitelint_parser::{FileType, Model};

use crate::LinterError;
use crate::finding::Finding;
use crate::rule::{ParamValue, RuleSet};

/// Which scan pass a checker is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPass {
    /// First scan of a file with every enabled checker.
    Full,
    /// Re-scan of a file whose type changed after its first scan.
    /// Only the parse-validity checker runs in this pass.
    TypeCorrection,
}

/// Per-file information handed to checkers.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub source: &'a Path,
    pub file_type: FileType,
    pub pass: ScanPass,
}

impl<'a> ScanContext<'a> {
    pub fn new(source: &'a Path, file_type: FileType, pass: ScanPass) -> Self {
        Self {
            source,
            file_type,
            pass,
        }
    }
}

/// A plugin owning a group of related rules.
///
/// Checkers are registered once at startup and are read-only while files
/// are scanned, so `scan` takes `&self`.
pub trait Checker: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    fn rules(&self) -> &RuleSet;

    fn rules_mut(&mut self) -> &mut RuleSet;

    /// Applies a parsed rule parameter.
    fn configure(&mut self, param: &str, value: ParamValue) -> Result<(), LinterError>;

    /// Scans one parsed file.
    fn scan(&self, ctx: &ScanContext<'_>, model: &Model) -> Vec<Finding>;

    /// Whether this checker reports parse-validity problems. That checker
    /// also reports files that could not be parsed at all.
    fn is_parse_validity(&self) -> bool {
        false
    }

    /// Reports a file that failed to parse. Only meaningful for the
    /// parse-validity checker.
    fn parse_failure(&self, _ctx: &ScanContext<'_>, _line: usize, _message: &str) -> Option<Finding> {
        None
    }
}
