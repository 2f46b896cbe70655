//! Finding counts per severity.

use std::collections::BTreeMap;

use crate::finding::Finding;
use crate::reports::Report;
use crate::rule::Severity;

pub struct RulesBySeverityReport {
    counts: BTreeMap<Severity, usize>,
}

impl RulesBySeverityReport {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl Default for RulesBySeverityReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for RulesBySeverityReport {
    fn name(&self) -> &str {
        "rules_by_error_type"
    }

    fn description(&self) -> &str {
        "Prints the number of issues per severity"
    }

    fn add_finding(&mut self, finding: &Finding) {
        *self.counts.entry(finding.severity).or_default() += 1;
    }

    fn render(&self) -> Option<String> {
        let total = self.total();
        if total == 0 {
            return Some("Found 0 issues".to_string());
        }

        let parts: Vec<String> = Severity::ALL
            .iter()
            .filter_map(|severity| {
                self.counts
                    .get(severity)
                    .map(|count| format!("{} {}(s)", count, severity.label()))
            })
            .collect();
        Some(format!("\nFound {} issues: {}.", total, parts.join(", ")))
    }
}
