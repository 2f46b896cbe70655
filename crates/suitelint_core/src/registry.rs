//! Checker and rule registry.
//!
//! The registry is built once at startup. It owns every checker, indexes
//! their rules by both id and name, and applies configuration directives.
//! While files are scanned it is only read.

use std::collections::HashMap;

use tracing::debug;

use crate::LinterError;
use crate::checker::Checker;
use crate::config::LinterConfig;
use crate::reports::ReportSet;
use crate::rule::{Rule, Severity};

/// Where a rule lives: the owning checker and the rule's name in it.
#[derive(Debug, Clone)]
struct RuleLocation {
    checker: usize,
    name: String,
}

struct RegisteredChecker {
    checker: Box<dyn Checker>,
    /// True when none of the checker's rules is enabled.
    disabled: bool,
}

/// Registered checkers and the global rule index.
#[derive(Default)]
pub struct Registry {
    checkers: Vec<RegisteredChecker>,
    rules: HashMap<String, RuleLocation>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a checker, resolving rule enablement from `config`.
    ///
    /// A checker without any enabled rule is kept but marked disabled so
    /// its scan is skipped. Fails without registering anything if a rule id
    /// or name is already taken.
    pub fn register_checker(
        &mut self,
        mut checker: Box<dyn Checker>,
        config: &LinterConfig,
    ) -> Result<(), LinterError> {
        for rule in checker.rules_mut().iter_mut() {
            rule.enabled = config.is_rule_enabled(rule);
        }
        let disabled = !checker.rules().any_enabled();
        let index = self.checkers.len();

        let mut pending: HashMap<String, RuleLocation> = HashMap::new();
        for rule in checker.rules().iter() {
            for (kind, key) in [("name", &rule.name), ("id", &rule.id)] {
                let previous = match self.rules.get(key) {
                    Some(location) => Some(self.checkers[location.checker].checker.name()),
                    None if pending.contains_key(key) => Some(checker.name()),
                    None => None,
                };
                if let Some(previous) = previous {
                    return Err(LinterError::duplicated_rule(
                        kind,
                        key.as_str(),
                        checker.name(),
                        previous,
                    ));
                }
                pending.insert(
                    key.clone(),
                    RuleLocation {
                        checker: index,
                        name: rule.name.clone(),
                    },
                );
            }
        }

        debug!(
            "Registered checker '{}' with {} rules{}",
            checker.name(),
            checker.rules().len(),
            if disabled { " (disabled)" } else { "" }
        );
        self.rules.extend(pending);
        self.checkers.push(RegisteredChecker { checker, disabled });
        Ok(())
    }

    /// Applies a `<rule-or-report>:<param>:<value>[:<value>...]` directive.
    pub fn configure(&mut self, directive: &str, reports: &mut ReportSet) -> Result<(), LinterError> {
        let parts: Vec<&str> = directive.split(':').collect();
        let [target, param, value, rest @ ..] = parts.as_slice() else {
            return Err(LinterError::config(format!(
                "Provided invalid config: '{}' (general pattern: <rule>:<param>:<value>)",
                directive
            )));
        };

        if let Some(location) = self.rules.get(*target).cloned() {
            return self.configure_rule(&location, target, param, value);
        }

        if let Some(report) = reports.get_mut(target) {
            let values: Vec<&str> = std::iter::once(*value).chain(rest.iter().copied()).collect();
            return report.configure(param, &values);
        }

        Err(LinterError::config(format!(
            "Provided rule or report '{}' does not exist",
            target
        )))
    }

    fn configure_rule(
        &mut self,
        location: &RuleLocation,
        target: &str,
        param: &str,
        value: &str,
    ) -> Result<(), LinterError> {
        let checker = &mut self.checkers[location.checker].checker;

        if param == "severity" {
            let severity: Severity = value.parse().map_err(LinterError::config)?;
            if let Some(rule) = checker.rules_mut().get_mut(&location.name) {
                debug!("Severity of rule '{}' set to {}", rule.name, severity);
                rule.severity = severity;
            }
            return Ok(());
        }

        let parse = checker
            .rules()
            .get(&location.name)
            .and_then(|rule| rule.param(param))
            .map(|p| p.parse)
            .ok_or_else(|| {
                LinterError::config(format!(
                    "Provided param '{}' for rule '{}' does not exist",
                    param, target
                ))
            })?;
        let parsed = parse(value).map_err(|e| {
            LinterError::config(format!(
                "Invalid value '{}' for param '{}' of rule '{}': {}",
                value, param, target, e
            ))
        })?;
        checker.configure(param, parsed)
    }

    /// Looks up a rule by id or name.
    pub fn rule(&self, key: &str) -> Option<&Rule> {
        let location = self.rules.get(key)?;
        self.checkers[location.checker]
            .checker
            .rules()
            .get(&location.name)
    }

    /// Every registered rule, sorted by id.
    pub fn rules_by_id(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self
            .checkers
            .iter()
            .flat_map(|entry| entry.checker.rules().iter())
            .collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    /// Every registered checker, in registration order.
    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(|entry| entry.checker.as_ref())
    }

    /// Checkers with at least one enabled rule, in registration order.
    pub fn enabled_checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers
            .iter()
            .filter(|entry| !entry.disabled)
            .map(|entry| entry.checker.as_ref())
    }

    /// The enabled checker responsible for parse validity.
    pub fn parse_validity_checker(&self) -> Option<&dyn Checker> {
        self.enabled_checkers()
            .find(|checker| checker.is_parse_validity())
    }

    /// Whether a registered checker was marked disabled.
    pub fn is_checker_disabled(&self, name: &str) -> Option<bool> {
        self.checkers
            .iter()
            .find(|entry| entry.checker.name() == name)
            .map(|entry| entry.disabled)
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}
