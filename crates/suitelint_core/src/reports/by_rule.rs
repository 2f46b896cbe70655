//! Finding counts per rule.

use std::collections::HashMap;

use crate::finding::Finding;
use crate::reports::Report;

pub struct RulesByIdReport {
    counts: HashMap<String, usize>,
}

impl RulesByIdReport {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl Default for RulesByIdReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Report for RulesByIdReport {
    fn name(&self) -> &str {
        "rules_by_id"
    }

    fn description(&self) -> &str {
        "Groups detected issues by rule id and prints the counts"
    }

    fn add_finding(&mut self, finding: &Finding) {
        *self.counts.entry(finding.full_name()).or_default() += 1;
    }

    fn render(&self) -> Option<String> {
        let mut report = String::from("\nIssues by ids:\n");
        if self.counts.is_empty() {
            report.push_str("No issues found\n");
            return Some(report);
        }

        let mut ordered: Vec<(&String, &usize)> = self.counts.iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let width = ordered
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let lines: Vec<String> = ordered
            .iter()
            .map(|(name, count)| format!("{:<width$} : {}", name, count, width = width))
            .collect();
        report.push_str(&lines.join("\n"));
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::rule::Severity;

    fn finding(rule_id: &str, rule_name: &str) -> Finding {
        Finding {
            source: PathBuf::from("suite.robot"),
            line: 1,
            col: 1,
            severity: Severity::Warning,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            desc: String::new(),
        }
    }

    #[test]
    fn test_render_empty() {
        let report = RulesByIdReport::new();
        let output = report.render().unwrap();
        assert!(output.contains("No issues found"));
        insta::assert_snapshot!(output.trim(), @r"
        Issues by ids:
        No issues found
        ");
    }

    #[test]
    fn test_render_sorted_by_count_and_padded() {
        let mut report = RulesByIdReport::new();
        report.add_finding(&finding("W1001", "trailing-whitespace"));
        report.add_finding(&finding("W0501", "line-too-long"));
        report.add_finding(&finding("W1001", "trailing-whitespace"));
        report.add_finding(&finding("E0401", "parsing-error"));

        let output = report.render().unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "Issues by ids:",
                "W1001 (trailing-whitespace) : 2",
                "E0401 (parsing-error)       : 1",
                "W0501 (line-too-long)       : 1",
            ]
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut report = RulesByIdReport::new();
        report.add_finding(&finding("W0501", "line-too-long"));
        assert_eq!(report.render(), report.render());
    }
}
