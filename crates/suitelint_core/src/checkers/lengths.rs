//! Line and file length checks.

use std::sync::LazyLock;

use regex::Regex;
use suitelint_parser::Model;

use crate::LinterError;
use crate::checker::{Checker, ScanContext};
use crate::finding::Finding;
use crate::rule::{ParamValue, Rule, RuleParam, RuleSet, Severity, parse_int, parse_str};

const LINE_TOO_LONG: &str = "line-too-long";
const FILE_TOO_LONG: &str = "file-too-long";

const DEFAULT_LINE_LENGTH: usize = 120;
const DEFAULT_MAX_LINES: usize = 400;

/// Lines holding a URL are not reported as too long by default.
static DEFAULT_IGNORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid default ignore pattern"));

pub struct LengthChecker {
    rules: RuleSet,
    line_length: usize,
    max_lines: usize,
    ignore_pattern: Regex,
}

impl LengthChecker {
    pub fn new() -> Self {
        let rules = RuleSet::new()
            .with(
                Rule::new(
                    "W0501",
                    LINE_TOO_LONG,
                    "Line is too long ({line_length}/{allowed_length})",
                    Severity::Warning,
                )
                .with_param(RuleParam::new(
                    "line_length",
                    "Number of characters allowed in one line",
                    parse_int,
                ))
                .with_param(RuleParam::new(
                    "ignore_pattern",
                    "Lines matching this regex are not checked",
                    parse_str,
                )),
            )
            .with(
                Rule::new(
                    "W0506",
                    FILE_TOO_LONG,
                    "File has too many lines ({lines_count}/{max_allowed_count})",
                    Severity::Warning,
                )
                .with_param(RuleParam::new(
                    "max_lines",
                    "Number of lines allowed in a file",
                    parse_int,
                )),
            );
        Self {
            rules,
            line_length: DEFAULT_LINE_LENGTH,
            max_lines: DEFAULT_MAX_LINES,
            ignore_pattern: DEFAULT_IGNORE_PATTERN.clone(),
        }
    }
}

impl Default for LengthChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn as_limit(param: &str, value: &ParamValue) -> Result<usize, LinterError> {
    value
        .as_int()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| LinterError::config(format!("Parameter '{}' expects an integer", param)))
}

impl Checker for LengthChecker {
    fn name(&self) -> &str {
        "lengths"
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    fn configure(&mut self, param: &str, value: ParamValue) -> Result<(), LinterError> {
        match param {
            "line_length" => self.line_length = as_limit(param, &value)?,
            "max_lines" => self.max_lines = as_limit(param, &value)?,
            "ignore_pattern" => {
                let pattern = value.as_str().ok_or_else(|| {
                    LinterError::config(format!("Parameter '{}' expects a pattern", param))
                })?;
                self.ignore_pattern = Regex::new(pattern).map_err(|e| {
                    LinterError::config(format!("Invalid ignore_pattern '{}': {}", pattern, e))
                })?;
            }
            _ => {
                return Err(LinterError::config(format!(
                    "Checker '{}' has no parameter '{}'",
                    self.name(),
                    param
                )));
            }
        }
        Ok(())
    }

    fn scan(&self, ctx: &ScanContext<'_>, model: &Model) -> Vec<Finding> {
        let mut findings: Vec<Finding> = model
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                let length = line.chars().count();
                if length <= self.line_length || self.ignore_pattern.is_match(line) {
                    return None;
                }
                self.rules.finding(
                    LINE_TOO_LONG,
                    ctx,
                    idx + 1,
                    self.line_length + 1,
                    &[
                        ("line_length", length.to_string()),
                        ("allowed_length", self.line_length.to_string()),
                    ],
                )
            })
            .collect();

        let lines_count = model.lines().len();
        if lines_count > self.max_lines {
            findings.extend(self.rules.finding(
                FILE_TOO_LONG,
                ctx,
                lines_count,
                1,
                &[
                    ("lines_count", lines_count.to_string()),
                    ("max_allowed_count", self.max_lines.to_string()),
                ],
            ));
        }
        findings
    }
}
