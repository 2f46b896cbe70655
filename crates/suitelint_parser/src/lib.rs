//! # suitelint_parser
//!
//! Parser layer for suitelint.
//!
//! This crate provides:
//! - `FileType`, the classification that selects a grammar for a file
//! - A `Parser` trait and the built-in section grammar (`SuiteParser`)
//! - The line/section `Model` consumed by rule checkers
//!
//! ## Example
//!
//! ```rust,ignore
//! use suitelint_parser::{FileType, parse_file};
//!
//! let model = parse_file(FileType::Resource, "keywords.resource")?;
//! for error in model.errors() {
//!     println!("{}:{} {}", error.line, error.col, error.message);
//! }
//! ```

mod error;
mod file_type;
mod model;
mod suite;
mod traits;

use std::fs;
use std::path::Path;

pub use error::ParseError;
pub use file_type::FileType;
pub use model::{Model, ModelError, ModelErrorKind, Section, SectionKind, Statement, Token};
pub use suite::SuiteParser;
pub use traits::Parser;

/// Reads `path` and parses it with the grammar selected by `file_type`.
pub fn parse_file(file_type: FileType, path: impl AsRef<Path>) -> Result<Model, ParseError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
    file_type.parser().parse(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file_uses_file_type_grammar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keywords.resource");
        fs::write(&path, "*** Test Cases ***\nCase\n").unwrap();

        let model = parse_file(FileType::Resource, &path).unwrap();
        assert_eq!(model.grammar(), "resource");
        assert_eq!(model.errors()[0].kind, ModelErrorKind::SectionNotAllowed);

        let model = parse_file(FileType::General, &path).unwrap();
        assert!(model.errors().is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempdir().unwrap();
        let err = parse_file(FileType::General, dir.path().join("missing.robot")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert_eq!(err.line(), None);
    }
}
