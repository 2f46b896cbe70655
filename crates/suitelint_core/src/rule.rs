//! Rule definitions.
//!
//! A [`Rule`] is one identified lint check. Checkers own their rules in a
//! [`RuleSet`] and create [`Finding`]s through it, which keeps the severity
//! and enablement overrides applied by configuration in one place.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checker::ScanContext;
use crate::finding::Finding;

/// Severity level for rules and findings.
///
/// Ordered from least to most severe so that a threshold can be compared
/// with `>=`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    /// Info - informational message.
    Info,
    /// Warning - should be reviewed.
    Warning,
    /// Error - must be fixed.
    #[default]
    Error,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Single-letter code (`E`, `W`, `I`).
    pub fn code(self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
            Severity::Info => 'I',
        }
    }

    /// Upper-case name used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "error" => Ok(Severity::Error),
            "w" | "warning" => Ok(Severity::Warning),
            "i" | "info" => Ok(Severity::Info),
            other => Err(format!(
                "invalid severity '{}' (expected one of: E, W, I)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.code().to_string()
    }
}

/// Parsed value of a configurable rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// Value parser for a configurable parameter.
pub type ParamParser = fn(&str) -> Result<ParamValue, String>;

/// Parses a non-negative integer parameter.
pub fn parse_int(value: &str) -> Result<ParamValue, String> {
    value
        .trim()
        .parse::<u32>()
        .map(|v| ParamValue::Int(i64::from(v)))
        .map_err(|e| format!("expected a non-negative integer, got '{}': {}", value, e))
}

/// Accepts any string.
pub fn parse_str(value: &str) -> Result<ParamValue, String> {
    Ok(ParamValue::Str(value.to_string()))
}

/// A configurable parameter declared by a rule.
#[derive(Debug, Clone)]
pub struct RuleParam {
    /// Name used in `<rule>:<param>:<value>` directives.
    pub name: &'static str,
    pub description: &'static str,
    pub parse: ParamParser,
}

impl RuleParam {
    pub fn new(name: &'static str, description: &'static str, parse: ParamParser) -> Self {
        Self {
            name,
            description,
            parse,
        }
    }
}

/// A single lint rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable short code such as `W0501`.
    pub id: String,
    /// Stable slug such as `line-too-long`.
    pub name: String,
    /// Message template; `{field}` placeholders are filled when reporting.
    pub message: String,
    pub severity: Severity,
    pub params: Vec<RuleParam>,
    /// Resolved from configuration at registration.
    pub enabled: bool,
}

impl Rule {
    /// Creates an enabled rule without parameters.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            message: message.into(),
            severity,
            params: Vec::new(),
            enabled: true,
        }
    }

    /// Declares a configurable parameter.
    pub fn with_param(mut self, param: RuleParam) -> Self {
        self.params.push(param);
        self
    }

    /// Looks up a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&RuleParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// `"{id} ({name})"`, the key used by per-rule reports.
    pub fn full_name(&self) -> String {
        format!("{} ({})", self.id, self.name)
    }

    /// Fills `{field}` placeholders of the message template in one pass.
    /// Unknown placeholders are kept as written.
    pub fn render_message(&self, args: &[(&str, String)]) -> String {
        let mut out = String::with_capacity(self.message.len());
        let mut rest = self.message.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find('}') else {
                out.push_str(after);
                return out;
            };
            let field = &after[1..close];
            match args.iter().find(|(key, _)| *key == field) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&after[..=close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule - {} [{}]: {}: {} ({})",
            self.id,
            self.severity,
            self.name,
            self.message,
            if self.enabled { "enabled" } else { "disabled" }
        )?;
        for param in &self.params {
            write!(f, "\n    {} - {}", param.name, param.description)?;
        }
        Ok(())
    }
}

/// Rules of one checker, keyed by rule name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, replacing any rule with the same name.
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.insert(rule.name.clone(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Rule> {
        self.rules.values_mut()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn any_enabled(&self) -> bool {
        self.rules.values().any(|rule| rule.enabled)
    }

    /// Builds a finding for `name`, or `None` if the rule is unknown or disabled.
    pub fn finding(
        &self,
        name: &str,
        ctx: &ScanContext<'_>,
        line: usize,
        col: usize,
        args: &[(&str, String)],
    ) -> Option<Finding> {
        let rule = self.rules.get(name).filter(|rule| rule.enabled)?;
        Some(Finding {
            source: ctx.source.to_path_buf(),
            line,
            col,
            severity: rule.severity,
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            desc: rule.render_message(args),
        })
    }
}
