//! Parsed file model.
//!
//! The model is intentionally shallow: a file is a list of sections, a
//! section is a list of statements, and a statement is a list of cell
//! tokens on one line. Raw lines are kept so that line-oriented checkers do
//! not have to re-read the file.

use serde::Serialize;

/// A single cell of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Cell text without separators.
    pub value: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column (in characters).
    pub col: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            value: value.into(),
            line,
            col,
        }
    }
}

/// One non-blank line inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// 1-based line.
    pub line: usize,
    /// Data cells, excluding the trailing comment.
    pub tokens: Vec<Token>,
    /// Trailing or standalone comment, including the `#`.
    pub comment: Option<Token>,
}

impl Statement {
    /// Whether the statement starts with an indent (belongs to a test or keyword body).
    pub fn is_indented(&self) -> bool {
        self.tokens.first().is_some_and(|t| t.col > 1)
    }

    /// Whether the statement holds only a comment.
    pub fn is_comment_only(&self) -> bool {
        self.tokens.is_empty() && self.comment.is_some()
    }

    /// First data cell.
    pub fn head(&self) -> Option<&Token> {
        self.tokens.first()
    }
}

/// Section kinds recognized by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Lines before the first section header.
    Implicit,
    Settings,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
}

impl SectionKind {
    /// Matches a header such as `*** Test Cases ***` (case-insensitive, singular allowed).
    pub fn from_header(header: &str) -> Option<Self> {
        let name = header
            .trim()
            .trim_matches('*')
            .trim()
            .to_ascii_lowercase();
        let kind = match name.as_str() {
            "settings" | "setting" => SectionKind::Settings,
            "variables" | "variable" => SectionKind::Variables,
            "test cases" | "test case" => SectionKind::TestCases,
            "tasks" | "task" => SectionKind::Tasks,
            "keywords" | "keyword" => SectionKind::Keywords,
            "comments" | "comment" => SectionKind::Comments,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical header title.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Implicit => "Implicit",
            SectionKind::Settings => "Settings",
            SectionKind::Variables => "Variables",
            SectionKind::TestCases => "Test Cases",
            SectionKind::Tasks => "Tasks",
            SectionKind::Keywords => "Keywords",
            SectionKind::Comments => "Comments",
        }
    }
}

/// A section of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Line of the header, `None` for the implicit section.
    pub header_line: Option<usize>,
    pub statements: Vec<Statement>,
}

/// Category of a recoverable grammar error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelErrorKind {
    /// The header does not name a known section.
    UnknownSection,
    /// The section is valid but not in this file type.
    SectionNotAllowed,
    /// A setting is missing its value.
    InvalidSetting,
}

/// A recoverable grammar error recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub line: usize,
    pub col: usize,
    pub message: String,
}

/// Parsed representation of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub(crate) grammar: String,
    pub(crate) lines: Vec<String>,
    pub(crate) sections: Vec<Section>,
    pub(crate) errors: Vec<ModelError>,
}

impl Model {
    /// Name of the grammar that produced this model.
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    /// Raw lines without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn errors(&self) -> &[ModelError] {
        &self.errors
    }

    /// Values of every `Resource` import in the settings section.
    pub fn resource_imports(&self) -> impl Iterator<Item = &Token> {
        self.sections
            .iter()
            .filter(|section| section.kind == SectionKind::Settings)
            .flat_map(|section| section.statements.iter())
            .filter(|stmt| {
                stmt.head()
                    .is_some_and(|head| head.value.eq_ignore_ascii_case("resource"))
            })
            .filter_map(|stmt| stmt.tokens.get(1))
    }

    /// Statements of all sections of the given kind.
    pub fn statements_in(&self, kind: SectionKind) -> impl Iterator<Item = &Statement> {
        self.sections
            .iter()
            .filter(move |section| section.kind == kind)
            .flat_map(|section| section.statements.iter())
    }
}
