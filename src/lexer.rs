use std::collections::VecDeque;

use crate::parser::{ParseError, ParseErrorKind};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// Tokenize a whole input in skip-whitespace mode, up to and including
/// the first `Eof` token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next();
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// A buffered token together with the scanner offset that re-lexing
/// must resume from to reproduce it in a different whitespace mode.
#[derive(Debug)]
struct Pending {
    token: Token,
    resume: usize,
}

/// Single-token-lookahead lexer with a whitespace-preservation switch.
///
/// In the default mode whitespace is skipped. While preserving
/// whitespace (inside string literals) each run of whitespace is
/// emitted as its own `Whitespace` token.
#[derive(Debug)]
pub struct Lexer {
    scanner: Scanner,
    pending: VecDeque<Pending>,
    preserve_whitespace: bool,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            scanner: Scanner::new(input),
            pending: VecDeque::new(),
            preserve_whitespace: false,
        }
    }

    /// Return the lookahead token without consuming it.
    pub fn peek(&mut self) -> &Token {
        if self.pending.is_empty() {
            self.fill();
        }
        // fill always leaves at least one token behind
        &self.pending[0].token
    }

    /// Consume and return the lookahead token. Past the end this keeps
    /// returning `Eof`.
    pub fn next(&mut self) -> Token {
        if self.pending.is_empty() {
            self.fill();
        }
        self.pending
            .pop_front()
            .map_or_else(|| Token::eof(self.scanner.offset()), |p| p.token)
    }

    pub fn eof(&mut self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    /// Consume the lookahead token if it has the given kind.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedToken` located at the offending token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let head = self.peek();
        if head.kind != kind {
            return Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken {
                    expected: kind.to_string(),
                    found: head.to_string(),
                },
                offset: head.offset,
            });
        }
        Ok(self.next())
    }

    #[must_use]
    pub const fn preserves_whitespace(&self) -> bool {
        self.preserve_whitespace
    }

    /// Switch whitespace mode. Buffered lookahead is discarded and the
    /// scanner rewound so that no input is lost or produced twice.
    pub fn set_preserve_whitespace(&mut self, preserve: bool) {
        if let Some(head) = self.pending.front() {
            self.scanner.seek(head.resume);
            self.pending.clear();
        }
        self.preserve_whitespace = preserve;
    }

    fn fill(&mut self) {
        let resume = self.scanner.offset();

        let mut whitespace = String::new();
        while let Some(c) = self.scanner.next_if(char::is_whitespace) {
            if self.preserve_whitespace {
                whitespace.push(c);
            }
        }
        if !whitespace.is_empty() {
            self.push(TokenKind::Whitespace, whitespace, resume, resume);
            return;
        }

        let start = self.scanner.offset();
        let mut buffer = String::new();
        loop {
            let offset = self.scanner.offset();
            if let Some(c) = self
                .scanner
                .next_if(|c| TokenKind::punctuation(c).is_some())
            {
                self.flush(&mut buffer, start, resume);
                if let Some(kind) = TokenKind::punctuation(c) {
                    self.push(kind, c.to_string(), offset, resume);
                }
                return;
            }
            match self.scanner.next_if(|c| !c.is_whitespace()) {
                Some(c) => buffer.push(c),
                None => break,
            }
        }

        self.flush(&mut buffer, start, resume);
        if self.pending.is_empty() {
            let offset = self.scanner.offset();
            self.push(TokenKind::Eof, String::new(), offset, resume);
        }
    }

    fn flush(&mut self, buffer: &mut String, offset: usize, resume: usize) {
        if buffer.is_empty() {
            return;
        }
        let text = std::mem::take(buffer);
        self.push(TokenKind::classify(&text), text, offset, resume);
    }

    /// Queue a token. Only the first token of a batch resumes at the
    /// batch start; later ones start exactly at their own offset.
    fn push(&mut self, kind: TokenKind, text: String, offset: usize, resume: usize) {
        let resume = if self.pending.is_empty() {
            resume
        } else {
            offset
        };
        self.pending.push_back(Pending {
            token: Token { kind, text, offset },
            resume,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_and_words() {
        assert_eq!(
            kinds(r#"{"a":[1.5,true]}"#),
            vec![
                TokenKind::OpenBrace,
                TokenKind::DoubleQuote,
                TokenKind::Text,
                TokenKind::DoubleQuote,
                TokenKind::Colon,
                TokenKind::OpenBracket,
                TokenKind::Digits,
                TokenKind::Dot,
                TokenKind::Digits,
                TokenKind::Comma,
                TokenKind::True,
                TokenKind::CloseBracket,
                TokenKind::CloseBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            kinds("true True null NULL false"),
            vec![
                TokenKind::True,
                TokenKind::Text,
                TokenKind::Null,
                TokenKind::Text,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn offsets_point_at_first_char() {
        let tokens = tokenize("  abc:12");
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[1].offset, 5);
        assert_eq!(tokens[2].offset, 6);
        assert_eq!(tokens[3].offset, 8);
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next().is(TokenKind::Text));
        assert!(lexer.next().is(TokenKind::Eof));
        assert!(lexer.next().is(TokenKind::Eof));
        assert!(lexer.eof());
    }

    #[test]
    fn preserve_mode_emits_whitespace_separately() {
        let mut lexer = Lexer::new("a  b");
        lexer.set_preserve_whitespace(true);
        assert_eq!(lexer.next().text, "a");
        let ws = lexer.next();
        assert_eq!(ws.kind, TokenKind::Whitespace);
        assert_eq!(ws.text, "  ");
        assert_eq!(ws.offset, 1);
        assert_eq!(lexer.next().text, "b");
    }

    #[test]
    fn switching_mode_rewinds_lookahead() {
        let mut lexer = Lexer::new(" x");
        assert_eq!(lexer.peek().text, "x");
        lexer.set_preserve_whitespace(true);
        let ws = lexer.next();
        assert_eq!(ws.kind, TokenKind::Whitespace);
        assert_eq!(ws.text, " ");
        assert_eq!(lexer.next().text, "x");
    }

    #[test]
    fn switching_mode_after_split_batch() {
        // "ab" and ":" are lexed together; consuming "ab" and then
        // switching must resume at ":" rather than at "ab".
        let mut lexer = Lexer::new("ab: c");
        assert_eq!(lexer.next().text, "ab");
        lexer.set_preserve_whitespace(true);
        assert!(lexer.next().is(TokenKind::Colon));
        assert!(lexer.next().is(TokenKind::Whitespace));
        assert_eq!(lexer.next().text, "c");
    }

    #[test]
    fn expect_reports_found_token_offset() {
        let mut lexer = Lexer::new("  ]");
        let err = lexer.expect(TokenKind::OpenBrace).unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    }
}
