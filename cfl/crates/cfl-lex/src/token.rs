//! Token definitions for the C-family lexer.
//!
//! A [`Token`] is a classified, zero-copy view into the normalized buffer of
//! the lexer that produced it. It keeps that buffer alive through a shared
//! handle, so tokens can be cloned freely and moved between token streams
//! (the preprocessor output mixes tokens from many files).

use std::fmt;
use std::sync::Arc;

use cfl_util::{Location, Span};

use crate::source::SourceText;

/// Classification of a token.
///
/// # Examples
///
/// ```
/// use cfl_lex::TokenKind;
///
/// assert_eq!(TokenKind::SpaceTab.to_string(), "space/tab");
/// assert!(TokenKind::Newline.is_whitespace());
/// assert!(!TokenKind::Name.is_whitespace());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Sentinel for "no token". Never produced by the lexer; returned when
    /// looking past the end of a token sequence.
    None,
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    Name,
    /// Numeric literal, including any suffix (`1.5f`, `3e-2`).
    Number,
    /// Run of spaces and tabs.
    SpaceTab,
    /// Line terminator: `\n` or `\r\n`.
    Newline,
    /// Quoted literal, quotes included.
    String,
    /// Any other single character.
    Other,
}

impl TokenKind {
    /// Returns true for `SpaceTab` and `Newline`.
    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::SpaceTab | TokenKind::Newline)
    }

    /// Returns a human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::None => "nothing",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::SpaceTab => "space/tab",
            TokenKind::Newline => "newline",
            TokenKind::String => "string",
            TokenKind::Other => "character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexical token.
///
/// `text()` is the token as it appears in the normalized buffer (splices
/// merged, comments blanked). `unmerged_text()` is the original source
/// range the token was produced from, splices and comments included.
///
/// Two tokens compare equal when they have the same kind and text,
/// regardless of which buffer they came from.
///
/// # Examples
///
/// ```
/// use cfl_lex::{Lexer, TokenKind};
///
/// let lexer = Lexer::lex("ab\\\ncd", "splice.c");
/// let token = &lexer.tokens()[0];
/// assert_eq!(token.kind(), TokenKind::Name);
/// assert_eq!(token.text(), "abcd");
/// assert_eq!(token.unmerged_text(), "ab\\\ncd");
/// ```
#[derive(Clone)]
pub struct Token {
    source: Arc<SourceText>,
    kind: TokenKind,
    span: Span,
    unmerged: Span,
}

impl Token {
    pub(crate) fn new(source: Arc<SourceText>, kind: TokenKind, span: Span) -> Self {
        let unmerged = source.unmerged(span);
        Self {
            source,
            kind,
            span,
            unmerged,
        }
    }

    /// The token's classification.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token text in the normalized buffer.
    #[inline]
    pub fn text(&self) -> &str {
        self.source.normalized_slice(self.span)
    }

    /// The original text this token covers, before normalization.
    pub fn unmerged_text(&self) -> &str {
        self.source.original_slice(self.unmerged)
    }

    /// Byte span in the normalized buffer.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Byte span in the original text.
    #[inline]
    pub fn unmerged_span(&self) -> Span {
        self.unmerged
    }

    /// Label of the file the token came from.
    #[inline]
    pub fn file(&self) -> &str {
        self.source.file_name()
    }

    /// The buffers this token points into.
    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    /// Line and column of the token's first original character.
    pub fn location(&self) -> Location {
        self.source.location_of(self.unmerged.start)
    }

    /// Returns true if this is a `Name` token spelled `name`.
    #[inline]
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.text() == name
    }

    /// Returns true if this is the `Other` token for `c`.
    #[inline]
    pub fn is_other(&self, c: char) -> bool {
        if self.kind != TokenKind::Other {
            return false;
        }
        let mut chars = self.text().chars();
        chars.next() == Some(c) && chars.next().is_none()
    }

    /// Returns true for a run of spaces and tabs.
    #[inline]
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::SpaceTab
    }

    /// Returns true for a line terminator.
    #[inline]
    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }

    /// Returns true for space/tab runs and line terminators.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Returns true if both tokens point into the same buffer.
    pub fn same_buffer(&self, other: &Token) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }

    /// Extends this token to also cover `other`.
    ///
    /// Only adjacent tokens of the same buffer can be joined; `other` must
    /// start exactly where `self` ends. The result keeps `self`'s kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_lex::Lexer;
    ///
    /// let lexer = Lexer::lex("a+b", "j.c");
    /// let t = lexer.tokens();
    /// let joined = t[0].join(&t[1]).unwrap();
    /// assert_eq!(joined.text(), "a+");
    /// assert!(t[0].join(&t[2]).is_none());
    /// ```
    pub fn join(&self, other: &Token) -> Option<Token> {
        if !self.same_buffer(other) {
            return None;
        }
        let span = self.span.join(other.span)?;
        Some(Token::new(Arc::clone(&self.source), self.kind, span))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text() == other.text()
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {:?})", self.kind, self.text())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
