use std::fmt;

use crate::ast::{JsonArray, JsonObject, KeyValue, Node, NumberLiteral, StringLiteral};
use crate::identifier::{self, Identifier};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The lookahead token was not the one the grammar requires.
    UnexpectedToken { expected: String, found: String },
    /// No value could start at this position.
    ExpectedValue,
    /// A comma in an object was not followed by another member.
    ExpectedAnotherMember,
    /// A `.` in a number was not followed by digits.
    ExpectedDigits,
    /// Unknown or malformed `\` escape inside a string.
    InvalidEscapeSequence,
    /// Character outside `[0-9A-Za-z_]` in a `${...}` name.
    InvalidIdentifierCharacter,
    /// `${}` in value position.
    MissingIdentifierName,
    /// Input continues after the top-level object.
    TrailingInput,
    /// Input ended before any value was found.
    PrematureEndOfInput,
    /// Objects and arrays nested deeper than the parser allows.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            Self::ExpectedValue => write!(f, "expected a value"),
            Self::ExpectedAnotherMember => {
                write!(f, "expected another member after ','")
            }
            Self::ExpectedDigits => write!(f, "expected digits after '.'"),
            Self::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            Self::InvalidIdentifierCharacter => {
                write!(f, "invalid character in identifier name")
            }
            Self::MissingIdentifierName => write!(f, "missing identifier name"),
            Self::TrailingInput => write!(f, "garbage at end of input"),
            Self::PrematureEndOfInput => write!(f, "premature end of input"),
            Self::NestingTooDeep => write!(f, "maximum nesting depth exceeded"),
        }
    }
}

/// Error produced during parsing, located at a character offset of the
/// original input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Human-readable description without the location.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Parse a document with placeholder support enabled.
///
/// # Errors
///
/// Returns `ParseError` on the first syntax error; there is no
/// recovery.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    Parser::new(input).parse()
}

/// Parse a document, choosing whether `${name}` placeholders are legal.
///
/// # Errors
///
/// Returns `ParseError` on the first syntax error.
pub fn parse_with(input: &str, placeholders: bool) -> Result<Node, ParseError> {
    Parser::new(input).placeholders(placeholders).parse()
}

/// Default limit on nested objects and arrays, the top-level object
/// included.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recursive-descent parser. One instance parses one input.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    placeholders: bool,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::from_lexer(Lexer::new(input))
    }

    #[must_use]
    pub const fn from_lexer(lexer: Lexer) -> Self {
        Self {
            lexer,
            placeholders: true,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Enable or disable `${name}` placeholders (enabled by default).
    /// When disabled, `$` is not a value start and `\$` is not a legal
    /// escape.
    #[must_use]
    pub const fn placeholders(mut self, enabled: bool) -> Self {
        self.placeholders = enabled;
        self
    }

    /// Limit how deeply objects and arrays may nest.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a single top-level object and require end of input after it.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` on the first syntax error.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let head = self.lexer.peek();
        if head.is(TokenKind::Eof) {
            return Err(ParseError::new(
                ParseErrorKind::PrematureEndOfInput,
                head.offset,
            ));
        }
        let root = Node::Object(self.parse_object()?);
        let tail = self.lexer.peek();
        if !tail.is(TokenKind::Eof) {
            return Err(ParseError::new(ParseErrorKind::TrailingInput, tail.offset));
        }
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<Option<Node>, ParseError> {
        let kind = self.lexer.peek().kind;
        let node = match kind {
            TokenKind::DoubleQuote => Node::String(self.parse_string()?),
            TokenKind::True => {
                self.lexer.next();
                Node::Boolean(true)
            }
            TokenKind::False => {
                self.lexer.next();
                Node::Boolean(false)
            }
            TokenKind::Null => {
                self.lexer.next();
                Node::Null
            }
            TokenKind::Digits => Node::Number(self.parse_number()?),
            TokenKind::Text if is_negative_integer(&self.lexer.peek().text) => {
                Node::Number(self.parse_number()?)
            }
            TokenKind::Dollar if self.placeholders => {
                Node::Placeholder(self.parse_placeholder_expression()?)
            }
            TokenKind::OpenBrace => Node::Object(self.parse_object()?),
            TokenKind::OpenBracket => Node::Array(self.parse_array()?),
            _ => return Ok(None),
        };
        Ok(Some(node))
    }

    fn expect_value(&mut self) -> Result<Node, ParseError> {
        match self.parse_value()? {
            Some(node) => Ok(node),
            None => Err(ParseError::new(
                ParseErrorKind::ExpectedValue,
                self.lexer.peek().offset,
            )),
        }
    }

    /// Open one nesting level at the container starting at `offset`.
    fn descend(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(ParseErrorKind::NestingTooDeep, offset));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<JsonObject, ParseError> {
        let open = self.lexer.expect(TokenKind::OpenBrace)?;
        self.descend(open.offset)?;
        let mut members = Vec::new();

        if !self.lexer.peek().is(TokenKind::CloseBrace) {
            loop {
                let key = self.parse_string()?;
                self.lexer.expect(TokenKind::Colon)?;
                let value = self.expect_value()?;
                members.push(KeyValue::new(key, value));

                if !self.lexer.peek().is(TokenKind::Comma) {
                    break;
                }
                self.lexer.next();
                let head = self.lexer.peek();
                if head.is(TokenKind::CloseBrace) || head.is(TokenKind::Eof) {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedAnotherMember,
                        head.offset,
                    ));
                }
            }
        }

        self.lexer.expect(TokenKind::CloseBrace)?;
        self.depth -= 1;
        Ok(JsonObject { members })
    }

    fn parse_array(&mut self) -> Result<JsonArray, ParseError> {
        let open = self.lexer.expect(TokenKind::OpenBracket)?;
        self.descend(open.offset)?;
        let mut elements = Vec::new();

        if !self.lexer.peek().is(TokenKind::CloseBracket) {
            loop {
                elements.push(self.expect_value()?);
                if !self.lexer.peek().is(TokenKind::Comma) {
                    break;
                }
                self.lexer.next();
            }
        }

        self.lexer.expect(TokenKind::CloseBracket)?;
        self.depth -= 1;
        Ok(JsonArray { elements })
    }

    /// `DIGITS ('.' DIGITS)?`, where the integer part may also be a
    /// `-DIGITS` text token.
    fn parse_number(&mut self) -> Result<NumberLiteral, ParseError> {
        let int_part = self.lexer.next().text;
        if !self.lexer.peek().is(TokenKind::Dot) {
            return Ok(NumberLiteral::from_parts(int_part));
        }
        self.lexer.next();
        let head = self.lexer.peek();
        if !head.is(TokenKind::Digits) {
            return Err(ParseError::new(ParseErrorKind::ExpectedDigits, head.offset));
        }
        let frac_part = self.lexer.next().text;
        Ok(NumberLiteral::from_parts(format!("{int_part}.{frac_part}")))
    }

    /// `'$' '{' name '}'`. The name is the concatenated text of every
    /// token up to the closing brace.
    fn parse_placeholder_expression(&mut self) -> Result<Identifier, ParseError> {
        self.lexer.expect(TokenKind::Dollar)?;
        self.lexer.expect(TokenKind::OpenBrace)?;

        let mut name = String::new();
        while !self.lexer.eof() && !self.lexer.peek().is(TokenKind::CloseBrace) {
            let token = self.lexer.next();
            if let Some(index) = identifier::first_invalid_index(&token.text) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidIdentifierCharacter,
                    token.offset + index,
                ));
            }
            name.push_str(&token.text);
        }
        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::MissingIdentifierName,
                self.lexer.peek().offset,
            ));
        }
        let close = self.lexer.expect(TokenKind::CloseBrace)?;

        Identifier::new(name)
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidIdentifierCharacter, close.offset))
    }

    fn parse_string(&mut self) -> Result<StringLiteral, ParseError> {
        self.lexer.expect(TokenKind::DoubleQuote)?;
        self.lexer.set_preserve_whitespace(true);
        let body = self.parse_string_body();
        self.lexer.set_preserve_whitespace(false);
        let value = body?;
        self.lexer.expect(TokenKind::DoubleQuote)?;
        Ok(StringLiteral::new(value))
    }

    fn parse_string_body(&mut self) -> Result<String, ParseError> {
        let placeholders = self.placeholders;
        let mut chars = StringChars::new(&mut self.lexer);
        let mut out = String::new();

        while chars.has_next() {
            if !chars.escaped && chars.at_backslash() {
                chars.next_char();
                chars.escaped = true;
                continue;
            }
            let offset = chars.offset();
            let Some(c) = chars.next_char() else {
                break;
            };
            if !chars.escaped {
                out.push(c);
                continue;
            }

            chars.escaped = false;
            match c {
                'u' => {
                    out.push_str("\\u");
                    for _ in 0..4 {
                        let offset = chars.next_offset();
                        match chars.next_char() {
                            Some(h) if h.is_ascii_hexdigit() => out.push(h),
                            _ => {
                                return Err(ParseError::new(
                                    ParseErrorKind::InvalidEscapeSequence,
                                    offset,
                                ));
                            }
                        }
                    }
                }
                '$' if placeholders => out.push('$'),
                '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidEscapeSequence,
                        offset,
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// `-DIGITS`, the lexer's view of a negative integer part.
fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Character stream over the tokens of a string body. An unescaped `"`
/// ends the stream without being consumed.
struct StringChars<'l> {
    lexer: &'l mut Lexer,
    token: Token,
    chars: Vec<char>,
    index: usize,
    escaped: bool,
}

impl<'l> StringChars<'l> {
    fn new(lexer: &'l mut Lexer) -> Self {
        let mut stream = Self {
            lexer,
            token: Token::eof(0),
            chars: Vec::new(),
            index: 0,
            escaped: false,
        };
        stream.fetch();
        stream
    }

    /// Load the next token. Returns false at the end of the body.
    fn fetch(&mut self) -> bool {
        self.index = 0;
        let head = self.lexer.peek();
        if head.is(TokenKind::DoubleQuote) && !self.escaped {
            self.token = Token::eof(head.offset);
            self.chars.clear();
            return false;
        }
        self.token = self.lexer.next();
        self.chars = self.token.text.chars().collect();
        !self.token.is(TokenKind::Eof)
    }

    fn has_next(&mut self) -> bool {
        if self.index >= self.chars.len() && !self.fetch() {
            return false;
        }
        !self.token.is(TokenKind::Eof) && self.index < self.chars.len()
    }

    fn next_char(&mut self) -> Option<char> {
        if !self.has_next() {
            return None;
        }
        let c = self.chars[self.index];
        self.index += 1;
        Some(c)
    }

    fn at_backslash(&self) -> bool {
        self.token.is(TokenKind::Backslash)
    }

    /// Offset of the next character to be read. Only meaningful right
    /// after `has_next`, see `next_offset`.
    const fn offset(&self) -> usize {
        self.token.offset + self.index
    }

    fn next_offset(&mut self) -> usize {
        self.has_next();
        self.offset()
    }
}
