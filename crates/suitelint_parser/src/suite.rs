//! Section grammar for suite, resource and init files.
//!
//! Cells are separated by a tab or by two or more spaces. A cell starting
//! with `#` begins a comment that runs to the end of the line. A line
//! starting with `*` is a section header.

use crate::{
    Model, ModelError, ModelErrorKind, ParseError, Parser, Section, SectionKind, Statement, Token,
};

/// Settings whose first argument is mandatory.
const IMPORT_SETTINGS: &[&str] = &["resource", "library", "variables"];

/// Section grammar parameterized by the sections a file type rejects.
#[derive(Debug, Clone)]
pub struct SuiteParser {
    name: &'static str,
    rejected: &'static [SectionKind],
    rejection: fn(SectionKind) -> String,
}

impl SuiteParser {
    /// Grammar for regular suite files. Every section is allowed.
    pub fn general() -> Self {
        Self {
            name: "general",
            rejected: &[],
            rejection: |kind| format!("'{}' section is not allowed", kind.title()),
        }
    }

    /// Grammar for resource files. Test and task sections are rejected.
    pub fn resource() -> Self {
        Self {
            name: "resource",
            rejected: &[SectionKind::TestCases, SectionKind::Tasks],
            rejection: |kind| format!("Resource file with '{}' section is invalid", kind.title()),
        }
    }

    /// Grammar for suite initialization files. Test and task sections are rejected.
    pub fn init() -> Self {
        Self {
            name: "init",
            rejected: &[SectionKind::TestCases, SectionKind::Tasks],
            rejection: |kind| {
                format!(
                    "'{}' section is not allowed in suite initialization file",
                    kind.title()
                )
            },
        }
    }

    fn check_header(&self, raw: &str, line: usize, errors: &mut Vec<ModelError>) -> SectionKind {
        let (tokens, _) = tokenize(raw, line);
        let header = tokens.first().map(|t| t.value.as_str()).unwrap_or(raw);

        match SectionKind::from_header(header) {
            Some(kind) if self.rejected.contains(&kind) => {
                errors.push(ModelError {
                    kind: ModelErrorKind::SectionNotAllowed,
                    line,
                    col: 1,
                    message: (self.rejection)(kind),
                });
                kind
            }
            Some(kind) => kind,
            None => {
                errors.push(ModelError {
                    kind: ModelErrorKind::UnknownSection,
                    line,
                    col: 1,
                    message: format!("Unrecognized section header '{}'", header),
                });
                // Content of an unknown section is not validated further.
                SectionKind::Comments
            }
        }
    }

    fn check_setting(stmt: &Statement, errors: &mut Vec<ModelError>) {
        if stmt.is_indented() || stmt.tokens.len() != 1 {
            return;
        }
        let Some(head) = stmt.head() else {
            return;
        };
        if IMPORT_SETTINGS.contains(&head.value.to_ascii_lowercase().as_str()) {
            errors.push(ModelError {
                kind: ModelErrorKind::InvalidSetting,
                line: head.line,
                col: head.col,
                message: format!("Setting '{}' requires a value", head.value),
            });
        }
    }
}

impl Parser for SuiteParser {
    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, source: &str) -> Result<Model, ParseError> {
        if let Some(offset) = source.find('\0') {
            let line = source[..offset].matches('\n').count() + 1;
            return Err(ParseError::invalid_source_at(
                "binary content is not supported",
                line,
            ));
        }

        let mut model = Model {
            grammar: self.name.to_string(),
            ..Model::default()
        };
        let mut current = Section {
            kind: SectionKind::Implicit,
            header_line: None,
            statements: Vec::new(),
        };

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            model.lines.push(raw.to_string());

            if raw.starts_with('*') {
                let kind = self.check_header(raw, line, &mut model.errors);
                let finished = std::mem::replace(
                    &mut current,
                    Section {
                        kind,
                        header_line: Some(line),
                        statements: Vec::new(),
                    },
                );
                push_section(&mut model.sections, finished);
                continue;
            }

            let (tokens, comment) = tokenize(raw, line);
            if tokens.is_empty() && comment.is_none() {
                continue;
            }
            let stmt = Statement {
                line,
                tokens,
                comment,
            };
            if current.kind == SectionKind::Settings {
                Self::check_setting(&stmt, &mut model.errors);
            }
            current.statements.push(stmt);
        }
        push_section(&mut model.sections, current);

        Ok(model)
    }
}

fn push_section(sections: &mut Vec<Section>, section: Section) {
    if section.header_line.is_some() || !section.statements.is_empty() {
        sections.push(section);
    }
}

fn is_separator_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        '\t' => true,
        ' ' => chars.get(i + 1).is_none_or(|c| *c == ' ' || *c == '\t'),
        _ => false,
    }
}

/// Splits a line into data cells and an optional comment.
fn tokenize(line: &str, lineno: usize) -> (Vec<Token>, Option<Token>) {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let start = i;
        if chars[i] == '#' {
            let value: String = chars[start..].iter().collect();
            let comment = Token::new(value.trim_end(), lineno, start + 1);
            return (tokens, Some(comment));
        }

        while i < chars.len() && !is_separator_at(&chars, i) {
            i += 1;
        }
        let value: String = chars[start..i].iter().collect();
        tokens.push(Token::new(value, lineno, start + 1));
    }

    (tokens, None)
}
