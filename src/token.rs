use std::fmt;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Opening brace `{`.
    OpenBrace,
    /// Closing brace `}`.
    CloseBrace,
    /// Opening bracket `[`.
    OpenBracket,
    /// Closing bracket `]`.
    CloseBracket,
    /// Colon `:`.
    Colon,
    /// Comma `,`.
    Comma,
    /// Double quote `"`.
    DoubleQuote,
    /// Backslash `\`.
    Backslash,
    /// Dollar sign `$`.
    Dollar,
    /// Dot `.`.
    Dot,
    /// Keyword `true`.
    True,
    /// Keyword `false`.
    False,
    /// Keyword `null`.
    Null,
    /// Run of ASCII decimal digits.
    Digits,
    /// Run of any other non-whitespace, non-punctuation characters.
    Text,
    /// Run of whitespace, only emitted in preserve-whitespace mode.
    Whitespace,
    /// End of input. Repeats forever once reached.
    Eof,
}

impl TokenKind {
    /// Map a punctuation character to its token kind.
    #[must_use]
    pub const fn punctuation(c: char) -> Option<Self> {
        Some(match c {
            '{' => Self::OpenBrace,
            '}' => Self::CloseBrace,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            ':' => Self::Colon,
            ',' => Self::Comma,
            '"' => Self::DoubleQuote,
            '\\' => Self::Backslash,
            '$' => Self::Dollar,
            '.' => Self::Dot,
            _ => return None,
        })
    }

    /// Classify a non-empty run of non-punctuation characters.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        match text {
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            _ if text.chars().all(|c| c.is_ascii_digit()) => Self::Digits,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenBrace => write!(f, "'{{'"),
            Self::CloseBrace => write!(f, "'}}'"),
            Self::OpenBracket => write!(f, "'['"),
            Self::CloseBracket => write!(f, "']'"),
            Self::Colon => write!(f, "':'"),
            Self::Comma => write!(f, "','"),
            Self::DoubleQuote => write!(f, "'\"'"),
            Self::Backslash => write!(f, "'\\'"),
            Self::Dollar => write!(f, "'$'"),
            Self::Dot => write!(f, "'.'"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Null => write!(f, "null"),
            Self::Digits => write!(f, "digits"),
            Self::Text => write!(f, "text"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A single token with its kind, text, and source offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Character offset of the token's first character.
    pub offset: usize,
}

impl Token {
    #[must_use]
    pub const fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            offset,
        }
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Digits | TokenKind::Text | TokenKind::Whitespace => {
                write!(f, "{} '{}'", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
