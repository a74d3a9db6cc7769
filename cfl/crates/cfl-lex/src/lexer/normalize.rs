//! Normalization pass.
//!
//! Deletes line splices (backslash + newline), replaces each comment with
//! one space and records where every normalized byte came from. String and
//! character literals are copied as-is so comment markers inside them stay
//! text.

use crate::source::OffsetMap;

/// Result of normalizing one source text.
pub(crate) struct Normalized {
    pub text: String,
    pub offsets: OffsetMap,
    /// Original offset of a block comment that never closed.
    pub unterminated_comment: Option<usize>,
}

/// Normalizes `original`. Never fails; an unterminated block comment stops
/// the pass at the comment start.
pub(crate) fn normalize(original: &str) -> Normalized {
    let mut n = Normalizer {
        original,
        bytes: original.as_bytes(),
        pos: 0,
        out: String::with_capacity(original.len()),
        offsets: OffsetMap::new(),
    };
    let unterminated_comment = n.run();
    Normalized {
        text: n.out,
        offsets: n.offsets,
        unterminated_comment,
    }
}

struct Normalizer<'a> {
    original: &'a str,
    bytes: &'a [u8],
    pos: usize,
    out: String,
    offsets: OffsetMap,
}

impl<'a> Normalizer<'a> {
    fn run(&mut self) -> Option<usize> {
        loop {
            self.pos = self.skip_splices(self.pos);
            let b = *self.bytes.get(self.pos)?;
            match b {
                b'/' => {
                    let start = self.pos;
                    let next = self.skip_splices(start + 1);
                    match self.bytes.get(next) {
                        Some(b'/') => self.line_comment(start, next + 1),
                        Some(b'*') => {
                            if !self.block_comment(start, next + 1) {
                                return Some(start);
                            }
                        },
                        _ => self.copy_char(),
                    }
                },
                b'"' | b'\'' => self.copy_literal(b),
                _ => self.copy_char(),
            }
        }
    }

    /// Returns the first position at or after `pos` that is not the start
    /// of a line splice.
    fn skip_splices(&self, mut pos: usize) -> usize {
        while self.bytes.get(pos) == Some(&b'\\') {
            match (self.bytes.get(pos + 1), self.bytes.get(pos + 2)) {
                (Some(b'\n'), _) => pos += 2,
                (Some(b'\r'), Some(b'\n')) => pos += 3,
                _ => break,
            }
        }
        pos
    }

    fn at_line_end(&self) -> bool {
        match self.bytes.get(self.pos) {
            Some(b'\n') => true,
            Some(b'\r') => self.bytes.get(self.pos + 1) == Some(&b'\n'),
            _ => false,
        }
    }

    fn char_len(&self) -> usize {
        self.original[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
    }

    /// Copies the whole character at the cursor.
    fn copy_char(&mut self) {
        let len = self.char_len();
        for i in 0..len {
            self.offsets.copied(self.out.len() + i, self.pos + i);
        }
        self.out.push_str(&self.original[self.pos..self.pos + len]);
        self.pos += len;
    }

    fn emit_comment_space(&mut self, start: usize) {
        self.offsets.comment(self.out.len(), start, self.pos);
        self.out.push(' ');
    }

    /// `//` comment: runs up to (not including) the line terminator.
    fn line_comment(&mut self, start: usize, body: usize) {
        self.pos = body;
        loop {
            self.pos = self.skip_splices(self.pos);
            if self.pos >= self.bytes.len() || self.at_line_end() {
                break;
            }
            self.pos += self.char_len();
        }
        self.emit_comment_space(start);
    }

    /// `/* */` comment. Returns false if the input ends first.
    fn block_comment(&mut self, start: usize, body: usize) -> bool {
        self.pos = body;
        loop {
            self.pos = self.skip_splices(self.pos);
            match self.bytes.get(self.pos) {
                None => return false,
                Some(b'*') => {
                    let next = self.skip_splices(self.pos + 1);
                    if self.bytes.get(next) == Some(&b'/') {
                        self.pos = next + 1;
                        self.emit_comment_space(start);
                        return true;
                    }
                    self.pos += 1;
                },
                Some(_) => self.pos += self.char_len(),
            }
        }
    }

    /// Copies a quoted literal up to its closing quote, the end of the line
    /// or the end of input.
    fn copy_literal(&mut self, quote: u8) {
        self.copy_char();
        loop {
            self.pos = self.skip_splices(self.pos);
            let Some(&b) = self.bytes.get(self.pos) else {
                return;
            };
            if self.at_line_end() {
                return;
            }
            self.copy_char();
            if b == quote {
                return;
            }
            if b == b'\\' {
                self.pos = self.skip_splices(self.pos);
                if self.pos < self.bytes.len() && !self.at_line_end() {
                    self.copy_char();
                }
            }
        }
    }
}
