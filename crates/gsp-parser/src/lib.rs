//! Parser for the GSP markup notation.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - lazy UTF-8 decoding, one character of pushback, row:col
//!   tracking for diagnostics
//! - **Name rules** - XML `NameStartChar` / `NameChar` classification
//! - **Parser** - recursive descent over elements, attributes (including the
//!   `.class` and `#id` shorthand), text runs with `@`-embedded elements, and
//!   the `!doctype` / `?xml` declarations
//!
//! Parsing stops at the first error; there is no recovery.
//!
//! ```
//! let tree = gsp_parser::parse_str("p .lead {- Hello @em{-there} }").unwrap();
//! assert_eq!(tree.as_element(tree.document_element().unwrap()).unwrap().tag_name, "p");
//! ```

/// Error types.
pub mod error;
/// Name character classes.
pub mod names;
/// The recursive-descent parser.
pub mod parser;
/// Code point scanner.
pub mod scanner;

use std::io::Read;

use gsp_ast::AstTree;

pub use error::{ParseError, ParseResult};
pub use names::{is_name_char, is_name_start_char, is_valid_name};
pub use parser::Parser;
pub use scanner::{Position, Scanner};

/// Parse GSP source read from `reader`.
///
/// The whole stream is read before parsing starts.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if reading fails, otherwise any error from
/// [`parse_bytes`].
pub fn parse<R: Read>(mut reader: R) -> ParseResult<AstTree> {
    let mut source = Vec::new();
    let _ = reader.read_to_end(&mut source)?;
    parse_bytes(&source)
}

/// Parse UTF-8 encoded GSP source.
///
/// # Errors
///
/// Returns [`ParseError::Decode`] for malformed UTF-8,
/// [`ParseError::UnexpectedEndOfInput`] when the source ends inside an open
/// element or text run, and [`ParseError::Syntax`] for anything else the
/// grammar rejects.
pub fn parse_bytes(source: &[u8]) -> ParseResult<AstTree> {
    Parser::new(source).run()
}

/// Parse GSP source held in a string.
///
/// # Errors
///
/// See [`parse_bytes`].
pub fn parse_str(source: &str) -> ParseResult<AstTree> {
    parse_bytes(source.as_bytes())
}
