//! Parse error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during parsing.
///
/// Recoverable grammar problems (an unknown section header, a section that is
/// not allowed in the file type) are not errors; they are recorded on the
/// [`Model`](crate::Model) so that checkers can report them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source text is invalid.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// 1-based line where the error occurred.
        line: Option<usize>,
    },
}

impl ParseError {
    /// Creates a new I/O error for `path`.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            line: None,
        }
    }

    /// Creates a new invalid source error at a line.
    pub fn invalid_source_at(message: impl Into<String>, line: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Line the error points at, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::InvalidSource { line, .. } => *line,
        }
    }
}
