//! Whitespace checks.

use suitelint_parser::Model;

use crate::LinterError;
use crate::checker::{Checker, ScanContext};
use crate::finding::Finding;
use crate::rule::{ParamValue, Rule, RuleSet, Severity};

const TRAILING_WHITESPACE: &str = "trailing-whitespace";
const TRAILING_BLANK_LINES: &str = "too-many-trailing-blank-lines";

pub struct SpacingChecker {
    rules: RuleSet,
}

impl SpacingChecker {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new()
                .with(Rule::new(
                    "W1001",
                    TRAILING_WHITESPACE,
                    "Trailing whitespace at the end of line",
                    Severity::Warning,
                ))
                .with(Rule::new(
                    "W1010",
                    TRAILING_BLANK_LINES,
                    "Too many blank lines at the end of file",
                    Severity::Warning,
                )),
        }
    }
}

impl Default for SpacingChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for SpacingChecker {
    fn name(&self) -> &str {
        "spacing"
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    fn configure(&mut self, param: &str, _value: ParamValue) -> Result<(), LinterError> {
        Err(LinterError::config(format!(
            "Checker '{}' has no parameter '{}'",
            self.name(),
            param
        )))
    }

    fn scan(&self, ctx: &ScanContext<'_>, model: &Model) -> Vec<Finding> {
        let lines = model.lines();
        let mut findings: Vec<Finding> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.ends_with([' ', '\t']))
            .filter_map(|(idx, line)| {
                let col = line.trim_end().chars().count() + 1;
                self.rules.finding(TRAILING_WHITESPACE, ctx, idx + 1, col, &[])
            })
            .collect();

        let blank_tail = lines
            .iter()
            .rev()
            .take_while(|line| line.trim().is_empty())
            .count();
        if blank_tail > 0 && blank_tail < lines.len() {
            let first_blank = lines.len() - blank_tail + 1;
            findings.extend(
                self.rules
                    .finding(TRAILING_BLANK_LINES, ctx, first_blank, 1, &[]),
            );
        }
        findings
    }
}
