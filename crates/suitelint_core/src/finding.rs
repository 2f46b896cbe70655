//! Findings reported by checkers.

use std::path::PathBuf;

use serde::Serialize;

use crate::rule::Severity;

/// Default per-finding output template.
pub const DEFAULT_FORMAT: &str = "{source}:{line}:{col} [{severity}] {rule_id} {desc}";

/// One rule violation at a file position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    /// File the finding belongs to.
    pub source: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub col: usize,
    pub severity: Severity,
    pub rule_id: String,
    pub rule_name: String,
    /// Rendered description.
    pub desc: String,
}

impl Finding {
    /// `"{id} ({name})"`, matching [`Rule::full_name`](crate::Rule::full_name).
    pub fn full_name(&self) -> String {
        format!("{} ({})", self.rule_id, self.rule_name)
    }

    /// Renders the finding with a line template.
    ///
    /// Supported fields: `{source}`, `{line}`, `{col}`, `{severity}`,
    /// `{rule_id}`, `{desc}`, `{msg_name}`. Unknown fields are left as is.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + self.desc.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find('}') else {
                out.push_str(after);
                return out;
            };
            let field = &after[1..close];
            match self.field(field) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&after[..=close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "source" => self.source.display().to_string(),
            "line" => self.line.to_string(),
            "col" => self.col.to_string(),
            "severity" => self.severity.to_string(),
            "rule_id" => self.rule_id.clone(),
            "desc" => self.desc.clone(),
            "msg_name" => self.rule_name.clone(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn finding() -> Finding {
        Finding {
            source: PathBuf::from("tests/suite.robot"),
            line: 12,
            col: 5,
            severity: Severity::Warning,
            rule_id: "W0501".to_string(),
            rule_name: "line-too-long".to_string(),
            desc: "Line is too long (130/120)".to_string(),
        }
    }

    #[test]
    fn test_default_format() {
        assert_eq!(
            finding().render(DEFAULT_FORMAT),
            "tests/suite.robot:12:5 [W] W0501 Line is too long (130/120)"
        );
    }

    #[rstest]
    #[case("{msg_name}", "line-too-long")]
    #[case("{rule_id}:{line}", "W0501:12")]
    #[case("{unknown} {col}", "{unknown} 5")]
    #[case("open { brace", "open { brace")]
    #[case("no fields", "no fields")]
    fn test_render_templates(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(finding().render(template), expected);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(finding().full_name(), "W0501 (line-too-long)");
    }
}
