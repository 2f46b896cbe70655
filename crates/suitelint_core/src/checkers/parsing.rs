//! Parse validity checker.

use suitelint_parser::{Model, ModelErrorKind};

use crate::LinterError;
use crate::checker::{Checker, ScanContext, ScanPass};
use crate::finding::Finding;
use crate::rule::{ParamValue, Rule, RuleSet, Severity};

const PARSING_ERROR: &str = "parsing-error";

/// Reports grammar errors recorded by the parser, and files that could not
/// be parsed at all.
///
/// In [`ScanPass::TypeCorrection`] only section placement errors are
/// reported: they are the only errors that depend on the file type, so the
/// rest were already reported by the first scan.
pub struct ParsingErrorChecker {
    rules: RuleSet,
}

impl ParsingErrorChecker {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new().with(Rule::new(
                "E0401",
                PARSING_ERROR,
                "Syntax error: {error_msg}",
                Severity::Error,
            )),
        }
    }
}

impl Default for ParsingErrorChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for ParsingErrorChecker {
    fn name(&self) -> &str {
        "errors"
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
        model
            .errors()
            .iter()
            .filter(|error| {
                ctx.pass == ScanPass::Full || error.kind == ModelErrorKind::SectionNotAllowed
            })
            .filter_map(|error| {
                self.rules.finding(
                    PARSING_ERROR,
                    ctx,
                    error.line,
                    error.col,
                    &[("error_msg", error.message.clone())],
                )
            })
            .collect()
    }

    fn is_parse_validity(&self) -> bool {
        true
    }

    fn parse_failure(&self, ctx: &ScanContext<'_>, line: usize, message: &str) -> Option<Finding> {
        self.rules.finding(
            PARSING_ERROR,
            ctx,
            line,
            1,
            &[("error_msg", message.to_string())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::{scan, scan_pass};
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use suitelint_parser::FileType;

    const MIXED: &str = "\
*** Settings ***
Resource

*** Bogus ***

*** Test Cases ***
Case
    No Operation
";

    #[test]
    fn test_reports_every_error_in_full_pass() {
        let checker = ParsingErrorChecker::new();
        let findings = scan(&checker, FileType::Resource, MIXED);

        let lines: Vec<_> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
        assert!(findings.iter().all(|f| f.rule_id == "E0401"));
        assert_eq!(
            findings[2].desc,
            "Syntax error: Resource file with 'Test Cases' section is invalid"
        );
    }

    #[test]
    fn test_type_correction_reports_only_section_placement() {
        let checker = ParsingErrorChecker::new();
        let findings = scan_pass(&checker, FileType::Resource, ScanPass::TypeCorrection, MIXED);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 6);
    }

    #[test]
    fn test_valid_general_file() {
        let checker = ParsingErrorChecker::new();
        let findings = scan(&checker, FileType::General, "*** Test Cases ***\nCase\n    Log    x\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_parse_failure_finding() {
        let checker = ParsingErrorChecker::new();
        let ctx = ScanContext::new(Path::new("bin.robot"), FileType::General, ScanPass::Full);

        let finding = checker.parse_failure(&ctx, 3, "binary content").unwrap();
        assert_eq!(finding.line, 3);
        assert_eq!(finding.rule_name, "parsing-error");
        assert_eq!(finding.desc, "Syntax error: binary content");
        assert!(checker.is_parse_validity());
    }

    #[test]
    fn test_has_no_params() {
        let mut checker = ParsingErrorChecker::new();
        assert!(checker.configure("anything", ParamValue::Int(1)).is_err());
    }
}
