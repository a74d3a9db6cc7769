//! Name lexing.

use super::core::Scanner;
use crate::chars::is_name_continue;

impl Scanner<'_> {
    /// Scans `[A-Za-z_][A-Za-z0-9_]*`. The cursor is on the first byte.
    pub(super) fn scan_name(&mut self) {
        self.cursor.advance();
        self.cursor.eat_while(is_name_continue);
    }
}
