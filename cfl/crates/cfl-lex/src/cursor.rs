//! Byte cursor for traversing the normalized buffer.
//!
//! The scanner only ever branches on ASCII bytes, so the cursor works in
//! bytes and only needs UTF-8 awareness when it steps over a character it
//! does not classify (see [`Cursor::advance_char`]).

/// A cursor for traversing text byte by byte.
///
/// # Example
///
/// ```
/// use cfl_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("ab");
/// assert_eq!(cursor.current_byte(), Some(b'a'));
/// cursor.advance();
/// assert_eq!(cursor.current_byte(), Some(b'b'));
/// cursor.advance();
/// assert!(cursor.is_at_end());
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    /// The text being traversed.
    source: &'a str,

    /// Current byte position in the text.
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the byte at the cursor, or `None` at the end.
    #[inline]
    pub fn current_byte(&self) -> Option<u8> {
        self.peek_byte(0)
    }

    /// Returns the byte `offset` bytes ahead of the cursor.
    #[inline]
    pub fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    /// Returns true if the current byte satisfies `pred`.
    #[inline]
    pub fn at(&self, pred: impl Fn(u8) -> bool) -> bool {
        self.current_byte().is_some_and(pred)
    }

    /// Advances one byte. Does nothing at the end.
    ///
    /// Only call this when the current byte is ASCII, so the position stays
    /// on a character boundary.
    #[inline]
    pub fn advance(&mut self) {
        if self.position < self.source.len() {
            self.position += 1;
        }
    }

    /// Advances over one whole character, however many bytes it takes.
    #[inline]
    pub fn advance_char(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
        }
    }

    /// Advances while the current byte satisfies `pred`.
    ///
    /// Returns the number of bytes consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.position;
        while self.at(&pred) {
            self.position += 1;
        }
        self.position - start
    }

    /// Consumes the current byte if it equals `expected`.
    #[inline]
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.current_byte() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the cursor is at the end of the text.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns true if a line terminator (`\n` or `\r\n`) starts here.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        match self.current_byte() {
            Some(b'\n') => true,
            Some(b'\r') => self.peek_byte(1) == Some(b'\n'),
            _ => false,
        }
    }

    /// Returns the current byte position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the text from `start` up to the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Returns the text from the cursor to the end.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }
}
