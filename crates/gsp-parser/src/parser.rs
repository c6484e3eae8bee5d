//! Recursive-descent parser producing an [`AstTree`].
//!
//! Grammar, informally:
//!
//! ```text
//! document    := (declaration | node)*
//! declaration := '!' "doctype" attrs '{' '}' | '?' "xml" attrs '{' '}'
//! node        := text | element
//! element     := ['>'] name attrs '{' node* '}'
//! attrs       := ('.' name | '#' name | name ['=' string])*
//! text        := ('-' | '=') (char | '@' element | escape)*
//! ```
//!
//! A text run has no closing delimiter of its own: it stops before the first
//! unescaped `}`, which then closes the enclosing element. A run at the top
//! level therefore always fails.

use gsp_ast::{AstTree, Attr, ElementData, NodeId, NodeKind};

use crate::error::{ParseError, ParseResult};
use crate::names::{is_name_char, is_name_start_char};
use crate::scanner::Scanner;

/// Describe a character for an error message, making whitespace visible.
fn describe(c: char) -> String {
    if c.is_whitespace() || c.is_control() {
        format!("‘{}’", c.escape_debug())
    } else {
        format!("‘{c}’")
    }
}

/// Parser state: the scanner over the source and the tree being built.
#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    tree: AstTree,
}

impl<'a> Parser<'a> {
    /// Create a parser over UTF-8 encoded source bytes.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            scanner: Scanner::new(input),
            tree: AstTree::new(),
        }
    }

    /// Parse the whole input and return the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered; nothing is recovered.
    pub fn run(mut self) -> ParseResult<AstTree> {
        loop {
            self.scanner.skip_whitespace()?;
            let Some(next) = self.scanner.peek()? else {
                return Ok(self.tree);
            };
            let id = match next {
                '!' | '?' => self.parse_declaration()?,
                _ => self.parse_node()?,
            };
            self.tree.append_child(NodeId::ROOT, id);
        }
    }

    // =========================================================================
    // Scanner helpers
    // =========================================================================

    fn unexpected_eof(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            position: self.scanner.position(),
        }
    }

    fn syntax_error(&self, expected: impl Into<String>, found: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            position: self.scanner.position(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Peek at the next character; running out of input is an error.
    fn peek_required(&self) -> ParseResult<char> {
        self.scanner.peek()?.ok_or_else(|| self.unexpected_eof())
    }

    /// Consume the next character; running out of input is an error.
    fn consume_required(&mut self) -> ParseResult<char> {
        self.scanner.consume()?.ok_or_else(|| self.unexpected_eof())
    }

    /// Skip whitespace and consume the next character; running out of input
    /// is an error.
    fn consume_non_whitespace_required(&mut self) -> ParseResult<char> {
        self.scanner
            .consume_non_whitespace()?
            .ok_or_else(|| self.unexpected_eof())
    }

    /// Consume the next character, which must be `wanted`.
    fn expect(&mut self, wanted: char) -> ParseResult<()> {
        let c = self.consume_required()?;
        if c == wanted {
            Ok(())
        } else {
            Err(self.syntax_error(describe(wanted), describe(c)))
        }
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    /// `node := text | element`
    fn parse_node(&mut self) -> ParseResult<NodeId> {
        self.scanner.skip_whitespace()?;
        match self.peek_required()? {
            '-' => self.parse_text(true),
            '=' => self.parse_text(false),
            _ => self.parse_element(),
        }
    }

    /// `element := ['>'] name attrs '{' node* '}'`
    fn parse_element(&mut self) -> ParseResult<NodeId> {
        self.scanner.skip_whitespace()?;
        let newline = self.peek_required()? == '>';
        if newline {
            self.expect('>')?;
        }

        let tag_name = self.parse_name("element name")?;
        let attrs = self.parse_attrs()?;
        self.expect('{')?;

        let id = self.tree.alloc(NodeKind::Element(ElementData {
            tag_name,
            attrs,
            newline,
        }));

        loop {
            self.scanner.skip_whitespace()?;
            if self.peek_required()? == '}' {
                break;
            }
            let child = self.parse_node()?;
            self.tree.append_child(id, child);
        }
        self.expect('}')?;

        Ok(id)
    }

    /// Parse a name, validating every character against the XML name rules.
    ///
    /// `what` names the construct for error messages.
    fn parse_name(&mut self, what: &str) -> ParseResult<String> {
        self.scanner.skip_whitespace()?;

        let first = self.consume_required()?;
        if !is_name_start_char(first) {
            return Err(self.syntax_error(
                what,
                format!("invalid character {}", describe(first)),
            ));
        }

        let mut name = String::from(first);
        while let Some(c) = self.scanner.consume()? {
            if !is_name_char(c) {
                self.scanner.unread();
                break;
            }
            name.push(c);
        }
        Ok(name)
    }

    /// `attrs := ('.' name | '#' name | name ['=' string])*`
    ///
    /// Stops in front of the `{` opening the body. Shorthand `.x` and `#x`
    /// expand in place to `class="x"` and `id="x"`.
    fn parse_attrs(&mut self) -> ParseResult<Vec<Attr>> {
        let mut attrs = Vec::with_capacity(2);

        loop {
            self.scanner.skip_whitespace()?;
            match self.peek_required()? {
                '{' => break,
                sigil @ ('.' | '#') => {
                    self.expect(sigil)?;
                    let key = if sigil == '.' { "class" } else { "id" };
                    let value = self.parse_name(&format!("{key} name after ‘{sigil}’"))?;
                    attrs.push(Attr::new(key, value));
                }
                _ => {
                    let key = self.parse_name("attribute name")?;
                    if self.consume_non_whitespace_required()? == '=' {
                        let value = self.parse_string()?;
                        attrs.push(Attr::new(key, value));
                    } else {
                        self.scanner.unread();
                        attrs.push(Attr::boolean(key));
                    }
                }
            }
        }

        Ok(attrs)
    }

    /// A double-quoted string. `\\` and `\"` are the only escapes.
    fn parse_string(&mut self) -> ParseResult<String> {
        let quote = self.consume_non_whitespace_required()?;
        if quote != '"' {
            return Err(self.syntax_error("double-quoted string", describe(quote)));
        }
        let opened_at = self.scanner.position();
        let unterminated = || ParseError::Syntax {
            position: opened_at,
            expected: "‘\"’ closing the string opened here".to_string(),
            found: "end of input".to_string(),
        };

        let mut value = String::new();
        loop {
            match self.scanner.consume()?.ok_or_else(unterminated)? {
                '"' => return Ok(value),
                '\\' => {
                    let escaped = self.scanner.consume()?.ok_or_else(unterminated)?;
                    if escaped != '\\' && escaped != '"' {
                        return Err(self.syntax_error(
                            "valid escape sequence (‘\\\\’ or ‘\\\"’)",
                            format!("‘\\{escaped}’"),
                        ));
                    }
                    value.push(escaped);
                }
                c => value.push(c),
            }
        }
    }

    /// `text := ('-' | '=') (char | '@' element | escape)*`
    ///
    /// `-` makes a trimming group, `=` a verbatim one. The run ends before
    /// the first unescaped `}`, which is left for the enclosing element.
    fn parse_text(&mut self, trim: bool) -> ParseResult<NodeId> {
        let _marker = self.consume_required()?;
        let group = self.tree.alloc(NodeKind::Group { trim });
        let mut buffer = String::new();

        loop {
            match self.consume_required()? {
                '}' => {
                    self.scanner.unread();
                    break;
                }
                '@' => {
                    self.flush_text(group, &mut buffer);
                    let element = self.parse_element()?;
                    self.tree.append_child(group, element);
                }
                '\\' => {
                    let escaped = self.consume_required()?;
                    if !matches!(escaped, '\\' | '@' | '}') {
                        return Err(self.syntax_error(
                            "valid escape sequence (‘\\\\’, ‘\\@’, or ‘\\}’)",
                            format!("‘\\{escaped}’"),
                        ));
                    }
                    buffer.push(escaped);
                }
                c => buffer.push(c),
            }
        }
        self.flush_text(group, &mut buffer);

        Ok(group)
    }

    /// Move accumulated text into a new text child of `parent`.
    fn flush_text(&mut self, parent: NodeId, buffer: &mut String) {
        if buffer.is_empty() {
            return;
        }
        let text = self.tree.alloc(NodeKind::Text(std::mem::take(buffer)));
        self.tree.append_child(parent, text);
    }

    /// `declaration := '!' "doctype" attrs '{' '}' | '?' "xml" attrs '{' '}'`
    fn parse_declaration(&mut self) -> ParseResult<NodeId> {
        let kind = match self.consume_required()? {
            '!' => {
                let keyword = self.parse_name("‘doctype’")?;
                if !keyword.eq_ignore_ascii_case("doctype") {
                    return Err(self.syntax_error("‘doctype’", format!("‘{keyword}’")));
                }
                NodeKind::DocType(self.parse_declaration_body()?)
            }
            '?' => {
                let keyword = self.parse_name("‘xml’")?;
                if keyword != "xml" {
                    return Err(self.syntax_error("‘xml’", format!("‘{keyword}’")));
                }
                NodeKind::XmlProlog(self.parse_declaration_body()?)
            }
            c => return Err(self.syntax_error("‘!’ or ‘?’", describe(c))),
        };
        Ok(self.tree.alloc(kind))
    }

    /// Attributes followed by an empty `{}` body.
    fn parse_declaration_body(&mut self) -> ParseResult<Vec<Attr>> {
        let attrs = self.parse_attrs()?;
        self.expect('{')?;
        let c = self.consume_non_whitespace_required()?;
        if c != '}' {
            return Err(self.syntax_error("‘}’ (declarations have no body)", describe(c)));
        }
        Ok(attrs)
    }
}
