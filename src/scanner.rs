//! Character cursor over an immutable input string.
//!
//! Offsets are `char` indices into the original input, not byte
//! positions, so they can be reported to users directly.

/// Error produced when reading past the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("end of input at offset {offset}")]
pub struct ScanError {
    pub offset: usize,
}

/// A seekable cursor over the characters of an input string.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Return the current character without consuming it.
    pub fn peek(&self) -> Result<char, ScanError> {
        self.chars
            .get(self.pos)
            .copied()
            .ok_or(ScanError { offset: self.pos })
    }

    /// Return the current character and advance past it.
    pub fn next(&mut self) -> Result<char, ScanError> {
        let c = self.peek()?;
        self.pos += 1;
        Ok(c)
    }

    /// Consume the current character only if `accept` returns true for it.
    pub fn next_if(&mut self, accept: impl FnOnce(char) -> bool) -> Option<char> {
        let c = self.peek().ok().filter(|&c| accept(c))?;
        self.pos += 1;
        Some(c)
    }

    #[must_use]
    pub const fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Index of the next unread character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Reposition the cursor. Offsets past the end clamp to end-of-input.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.chars.len());
    }

    /// Total number of characters in the input.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
