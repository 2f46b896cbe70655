//! In-source disabler directives.
//!
//! A comment such as `# suitelint: disable=line-too-long` suppresses
//! findings. On a line that also holds data the directive applies to that
//! line only; on a standalone comment line it opens a block that lasts until
//! a matching standalone `enable` (or an `enable` for `all`, or end of
//! file). A directive without a rule list applies to every rule.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::finding::Finding;

/// Rule key used by directives without an explicit rule list.
pub const ALL_RULES: &str = "all";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"suitelint: (?P<action>disable|enable)=?(?P<rules>[\w\-,]*)")
        .expect("Invalid disabler directive pattern")
});

/// How a whole file is recognized as disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileDisableMode {
    /// The single `all` block opens before any content line and runs to
    /// the last line.
    #[default]
    FirstContentLine,
    /// The single `all` block must be exactly `(0, last_line)`. Directive
    /// lines are 1-based, so this never matches; kept for comparison.
    Strict,
}

/// Disablers of one rule key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisablerEntry {
    /// Lines disabled by inline directives.
    pub lines: BTreeSet<usize>,
    /// Closed blocks, inclusive on both ends.
    pub blocks: Vec<(usize, usize)>,
    /// Start of the currently open block.
    pub open_block: Option<usize>,
}

impl DisablerEntry {
    pub fn add_inline_line(&mut self, line: usize) {
        self.lines.insert(line);
    }

    /// Opens a block. A block that is already open stays as it is.
    pub fn start_block(&mut self, line: usize) {
        if self.open_block.is_none() {
            self.open_block = Some(line);
        }
    }

    /// Closes the open block, if any, at `line`.
    pub fn end_block(&mut self, line: usize) {
        if let Some(start) = self.open_block.take() {
            self.blocks.push((start, line));
        }
    }

    /// Whether `line` is disabled by an inline directive or a closed block.
    pub fn covers(&self, line: usize) -> bool {
        self.lines.contains(&line)
            || self
                .blocks
                .iter()
                .any(|&(start, end)| start <= line && line <= end)
    }
}

/// All disablers of one file.
#[derive(Debug, Clone, Default)]
pub struct Disablers {
    rules: HashMap<String, DisablerEntry>,
    file_disabled: bool,
    any_disabler: bool,
}

impl Disablers {
    /// Reads and parses `path`.
    ///
    /// An unreadable file yields no disablers, so nothing in it is
    /// suppressed; the read error surfaces later when the file is parsed.
    pub fn from_path(path: &Path, mode: FileDisableMode) -> Self {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_source(&source, mode),
            Err(e) => {
                warn!("Failed to read {} for disablers: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses disabler directives of a whole file.
    pub fn from_source(source: &str, mode: FileDisableMode) -> Self {
        let mut disablers = Self::default();
        let mut last_line = 0;
        let mut first_content_line = None;

        for (idx, line) in source.lines().enumerate() {
            let lineno = idx + 1;
            last_line = lineno;

            let statement = match line.split_once('#') {
                Some((statement, comment)) => {
                    disablers.parse_comment(statement, comment, lineno);
                    statement
                }
                None => line,
            };
            if first_content_line.is_none() && !statement.trim().is_empty() {
                first_content_line = Some(lineno);
            }
        }

        disablers.end_block(ALL_RULES, last_line);
        disablers.any_disabler = !disablers.rules.is_empty();
        disablers.file_disabled = disablers.is_file_disabled(last_line, first_content_line, mode);
        disablers
    }

    fn parse_comment(&mut self, statement: &str, comment: &str, lineno: usize) {
        let Some(caps) = DIRECTIVE.captures(comment) else {
            return;
        };

        let mut rules: Vec<&str> = caps
            .name("rules")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split(',')
            .filter(|rule| !rule.is_empty())
            .collect();
        if rules.is_empty() {
            rules.push(ALL_RULES);
        }

        let block = statement.is_empty();
        match &caps["action"] {
            "disable" => {
                for rule in rules {
                    let entry = self.rules.entry(rule.to_string()).or_default();
                    if block {
                        entry.start_block(lineno);
                    } else {
                        entry.add_inline_line(lineno);
                    }
                }
            }
            "enable" if block => {
                for rule in rules {
                    self.end_block(rule, lineno);
                }
            }
            _ => {}
        }
    }

    /// Closes the open block of `rule`. Closing `all` closes every open block.
    fn end_block(&mut self, rule: &str, lineno: usize) {
        if rule == ALL_RULES {
            for entry in self.rules.values_mut() {
                entry.end_block(lineno);
            }
        } else if let Some(entry) = self.rules.get_mut(rule) {
            entry.end_block(lineno);
        }
    }

    fn is_file_disabled(
        &self,
        last_line: usize,
        first_content_line: Option<usize>,
        mode: FileDisableMode,
    ) -> bool {
        let Some(all) = self.rules.get(ALL_RULES) else {
            return false;
        };
        let [(start, end)] = all.blocks.as_slice() else {
            return false;
        };

        match mode {
            FileDisableMode::Strict => (*start, *end) == (0, last_line),
            FileDisableMode::FirstContentLine => {
                *end == last_line && first_content_line.is_none_or(|first| *start <= first)
            }
        }
    }

    /// Whether the finding is suppressed.
    ///
    /// `all` is checked first, then the rule id, then the rule name.
    pub fn is_disabled(&self, finding: &Finding) -> bool {
        if !self.any_disabler {
            return false;
        }
        [
            ALL_RULES,
            finding.rule_id.as_str(),
            finding.rule_name.as_str(),
        ]
        .into_iter()
        .any(|key| self.is_line_disabled(key, finding.line))
    }

    /// Whether `line` is disabled for the given rule key alone.
    pub fn is_line_disabled(&self, rule: &str, line: usize) -> bool {
        self.rules.get(rule).is_some_and(|entry| entry.covers(line))
    }

    pub fn file_disabled(&self) -> bool {
        self.file_disabled
    }

    pub fn has_any_disabler(&self) -> bool {
        self.any_disabler
    }

    pub fn entry(&self, rule: &str) -> Option<&DisablerEntry> {
        self.rules.get(rule)
    }
}
