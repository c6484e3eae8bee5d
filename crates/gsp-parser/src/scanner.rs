//! Code point scanner over raw input bytes.
//!
//! Decodes UTF-8 lazily, one code point at a time, so a malformed sequence is
//! reported where it occurs rather than before parsing starts. Supports a
//! single step of backtracking through [`Scanner::unread`].

use std::fmt;

use crate::error::{ParseError, ParseResult};

/// Location of the most recently consumed character.
///
/// Rows are stored 0-based and columns count the characters consumed on the
/// current row, so the [`Display`](fmt::Display) form `row:col` reads 1-based,
/// the way editors number lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Line index, starting at 0.
    pub row: usize,
    /// Characters consumed on this line; 0 right after a line feed.
    pub col: usize,
    /// Column of the line feed that ended the previous row.
    prev_col: usize,
}

impl Position {
    /// Create a position at the given row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            prev_col: 0,
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col)
    }
}

/// Forward-only cursor over UTF-8 input with one character of pushback.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    offset: usize,
    pos: Position,
    /// The last consumed character and its encoded width, while it may
    /// still be unread.
    last: Option<(char, usize)>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned before the first byte of `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            pos: Position {
                row: 0,
                col: 0,
                prev_col: 0,
            },
            last: None,
        }
    }

    /// The position of the last consumed character.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Decode the code point starting at the current offset.
    fn decode(&self) -> ParseResult<Option<(char, usize)>> {
        let Some(&lead) = self.input.get(self.offset) else {
            return Ok(None);
        };
        let width = match lead {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(self.decode_error()),
        };
        let bytes = self
            .input
            .get(self.offset..self.offset + width)
            .ok_or_else(|| self.decode_error())?;
        // from_utf8 also rejects overlong forms and surrogates.
        let decoded = std::str::from_utf8(bytes).map_err(|_| self.decode_error())?;
        decoded
            .chars()
            .next()
            .map(|c| Some((c, width)))
            .ok_or_else(|| self.decode_error())
    }

    fn decode_error(&self) -> ParseError {
        ParseError::Decode { position: self.pos }
    }

    /// Return the next character without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] if the input is not valid UTF-8 here.
    pub fn peek(&self) -> ParseResult<Option<char>> {
        Ok(self.decode()?.map(|(c, _)| c))
    }

    /// Consume and return the next character, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] if the input is not valid UTF-8 here.
    pub fn consume(&mut self) -> ParseResult<Option<char>> {
        let Some((c, width)) = self.decode()? else {
            self.last = None;
            return Ok(None);
        };
        self.offset += width;
        self.last = Some((c, width));
        if c == '\n' {
            self.pos.prev_col = self.pos.col;
            self.pos.col = 0;
            self.pos.row += 1;
        } else {
            self.pos.col += 1;
        }
        Ok(Some(c))
    }

    /// Step back over the last consumed character.
    ///
    /// Only one character can be unread between two calls to
    /// [`consume`](Self::consume); further calls do nothing.
    pub fn unread(&mut self) {
        let Some((c, width)) = self.last.take() else {
            return;
        };
        self.offset -= width;
        if c == '\n' {
            self.pos.col = self.pos.prev_col;
            self.pos.row -= 1;
        } else {
            self.pos.col -= 1;
        }
    }

    /// Advance past any Unicode whitespace.
    ///
    /// Afterwards the next character is either non-whitespace or the end of
    /// input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] on malformed input.
    pub fn skip_whitespace(&mut self) -> ParseResult<()> {
        while let Some(c) = self.consume()? {
            if !c.is_whitespace() {
                self.unread();
                break;
            }
        }
        Ok(())
    }

    /// Skip whitespace, then consume the next character.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] on malformed input.
    pub fn consume_non_whitespace(&mut self) -> ParseResult<Option<char>> {
        self.skip_whitespace()?;
        self.consume()
    }
}
