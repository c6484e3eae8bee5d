//! Error types for parsing GSP source.

use thiserror::Error;

use crate::scanner::Position;

/// Errors that abort a parse. The first error ends the parse; no partial
/// tree is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source breaks the grammar or contains an illegal name character.
    #[error("syntax error near {position}; expected {expected} but found {found}")]
    Syntax {
        /// Where the offending character was read.
        position: Position,
        /// What the grammar allowed at this point.
        expected: String,
        /// What the source contained instead.
        found: String,
    },

    /// The source ended while an element or text run was still open.
    #[error("unexpected end of input near {position}")]
    UnexpectedEndOfInput {
        /// The last character read before the input ran out.
        position: Position,
    },

    /// The source is not valid UTF-8.
    #[error("malformed UTF-8 near {position}")]
    Decode {
        /// The last character decoded successfully.
        position: Position,
    },

    /// Reading the source stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Where in the source the error was detected, if it came from the source.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::Decode { position } => Some(*position),
            Self::Io(_) => None,
        }
    }

    /// Whether the input ran out inside an open construct, which almost
    /// always means a `}` is missing.
    #[must_use]
    pub const fn is_unexpected_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfInput { .. })
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
