//! Linter error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up or running the linter.
///
/// All variants are fatal for the run. Problems confined to a single file
/// (unreadable or unparsable source) are reported as findings instead.
#[derive(Debug, Error)]
pub enum LinterError {
    /// A configured path does not exist.
    #[error("File error: path '{}' does not exist", .0.display())]
    File(PathBuf),

    /// Two checkers declare the same rule id or name.
    #[error(
        "Duplicated rule {kind} '{key}' in checker '{checker}': already defined by checker '{previous}'"
    )]
    DuplicatedRule {
        /// Either `"id"` or `"name"`.
        kind: &'static str,
        /// The clashing id or name.
        key: String,
        /// Checker being registered.
        checker: String,
        /// Checker that registered the key first.
        previous: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates a duplicated rule error.
    pub fn duplicated_rule(
        kind: &'static str,
        key: impl Into<String>,
        checker: impl Into<String>,
        previous: impl Into<String>,
    ) -> Self {
        Self::DuplicatedRule {
            kind,
            key: key.into(),
            checker: checker.into(),
            previous: previous.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicated_rule_message() {
        let err = LinterError::duplicated_rule("name", "line-too-long", "spacing", "lengths");
        assert_eq!(
            err.to_string(),
            "Duplicated rule name 'line-too-long' in checker 'spacing': already defined by checker 'lengths'"
        );
    }

    #[test]
    fn test_file_error_message() {
        let err = LinterError::file("missing/dir");
        assert_eq!(err.to_string(), "File error: path 'missing/dir' does not exist");
    }
}
