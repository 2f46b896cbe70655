//! Parser trait definition.

use crate::{Model, ParseError};

/// Trait for parsing source text into a [`Model`].
///
/// Each [`FileType`](crate::FileType) maps to one implementation; the
/// implementations differ in which sections they accept.
///
/// # Example
///
/// ```rust,ignore
/// use suitelint_parser::{Model, ParseError, Parser};
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn parse(&self, source: &str) -> Result<Model, ParseError> {
///         // Parse implementation
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Parses the source text into a model.
    ///
    /// Grammar violations that still leave a usable model are recorded in
    /// [`Model::errors`]; only unusable input returns `Err`.
    fn parse(&self, source: &str) -> Result<Model, ParseError>;
}
