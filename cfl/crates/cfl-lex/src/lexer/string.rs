//! String and character literal lexing.

use super::core::Scanner;

impl Scanner<'_> {
    /// Scans a quoted literal. The cursor is on the opening quote.
    ///
    /// The literal ends after the matching unescaped quote, before a line
    /// terminator, or at the end of the buffer, whichever comes first.
    pub(super) fn scan_string(&mut self, quote: u8) {
        self.cursor.advance();
        while !self.cursor.is_at_end() && !self.cursor.at_line_end() {
            match self.cursor.current_byte() {
                Some(b) if b == quote => {
                    self.cursor.advance();
                    return;
                },
                Some(b'\\') => {
                    self.cursor.advance();
                    if !self.cursor.is_at_end() && !self.cursor.at_line_end() {
                        self.cursor.advance_char();
                    }
                },
                _ => self.cursor.advance_char(),
            }
        }
    }
}
