//! Number lexing.
//!
//! Numbers are scanned by shape only: integer digits, an optional fraction,
//! an optional exponent and then any suffix characters. The value is never
//! computed here.

use super::core::Scanner;
use crate::chars::{is_exponent_marker, is_name_continue};

impl Scanner<'_> {
    /// Scans a number. The cursor is on its first digit.
    pub(super) fn scan_number(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit());

        if self.cursor.eat(b'.') {
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        if self.cursor.at(is_exponent_marker) {
            self.cursor.advance();
            if !self.cursor.eat(b'+') {
                self.cursor.eat(b'-');
            }
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        // suffix: f, u, l, x1F, ...
        self.cursor.eat_while(is_name_continue);
    }
}
