//! Core lexer implementation.
//!
//! This module contains the `Lexer` type that owns one lexed source unit,
//! and the scan loop that cuts the normalized buffer into tokens.

use std::sync::Arc;

use cfl_util::{DiagnosticBuilder, DiagnosticCode, DiagnosticSink, SourceFile, Span};

use super::normalize::normalize;
use crate::chars::{is_name_start, is_quote, is_space_tab};
use crate::cursor::Cursor;
use crate::source::SourceText;
use crate::token::{Token, TokenKind};

/// One lexed source unit.
///
/// Lexing is total: any input produces a token sequence. The only problem
/// the lexer can hit is a block comment that is still open at the end of
/// input; in that case [`Lexer::unexpected_eof`] is set and the tokens
/// cover everything before the comment.
///
/// # Example
///
/// ```
/// use cfl_lex::Lexer;
///
/// let lexer = Lexer::lex("x = 1; /* open", "partial.c");
/// assert!(lexer.unexpected_eof());
/// let text: String = lexer.tokens().iter().map(|t| t.text()).collect();
/// assert_eq!(text, "x = 1; ");
/// ```
#[derive(Debug)]
pub struct Lexer {
    source: Arc<SourceText>,
    tokens: Vec<Token>,
    /// Original offset of an unterminated block comment.
    unterminated_comment: Option<usize>,
}

impl Lexer {
    /// Lexes `text`, labelling every token with `file`.
    pub fn lex(text: &str, file: impl Into<Arc<str>>) -> Self {
        let normalized = normalize(text);
        let source = SourceText::new(
            SourceFile::new(file, text),
            normalized.text,
            normalized.offsets,
        );
        let tokens = Scanner::new(&source).scan_all();

        Self {
            source,
            tokens,
            unterminated_comment: normalized.unterminated_comment,
        }
    }

    /// The tokens, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the lexer, keeping only its tokens. The tokens keep the
    /// underlying buffers alive.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Kind of the token at `index`, or [`TokenKind::None`] past the end.
    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens
            .get(index)
            .map_or(TokenKind::None, Token::kind)
    }

    /// Returns true if a block comment was still open at the end of input.
    pub fn unexpected_eof(&self) -> bool {
        self.unterminated_comment.is_some()
    }

    /// The file label.
    pub fn file(&self) -> &str {
        self.source.file_name()
    }

    /// The normalized buffer the tokens were cut from.
    pub fn normalized(&self) -> &str {
        self.source.normalized()
    }

    /// The text exactly as it was given.
    pub fn original(&self) -> &str {
        self.source.original()
    }

    /// The shared buffers behind this lexer's tokens.
    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    /// Reports lexical problems to `sink`.
    pub fn report_errors(&self, sink: &dyn DiagnosticSink) {
        if let Some(offset) = self.unterminated_comment {
            DiagnosticBuilder::error("unexpected end of file in block comment")
                .code(DiagnosticCode::UNTERMINATED_COMMENT)
                .location(self.source.location_of(offset))
                .emit(sink);
        }
    }
}

/// Lexes `text` and returns its tokens together with the unexpected-EOF
/// flag.
///
/// # Example
///
/// ```
/// let (tokens, eof) = cfl_lex::lex("a\\\nb", "splice.c");
/// assert!(!eof);
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].text(), "ab");
/// ```
pub fn lex(text: &str, file: impl Into<Arc<str>>) -> (Vec<Token>, bool) {
    let lexer = Lexer::lex(text, file);
    let eof = lexer.unexpected_eof();
    (lexer.into_tokens(), eof)
}

/// Cuts a normalized buffer into tokens.
pub(super) struct Scanner<'a> {
    pub(super) cursor: Cursor<'a>,
    source: &'a Arc<SourceText>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a Arc<SourceText>) -> Self {
        Self {
            cursor: Cursor::new(source.normalized()),
            source,
            tokens: Vec::new(),
        }
    }

    fn scan_all(mut self) -> Vec<Token> {
        while let Some(b) = self.cursor.current_byte() {
            let start = self.cursor.position();
            let kind = self.scan_token(b);
            let span = Span::new(start, self.cursor.position());
            debug_assert!(!span.is_empty());
            self.tokens
                .push(Token::new(Arc::clone(self.source), kind, span));
        }
        self.tokens
    }

    /// Scans one token starting with byte `b`.
    fn scan_token(&mut self, b: u8) -> TokenKind {
        if is_quote(b) {
            self.scan_string(b);
            TokenKind::String
        } else if is_name_start(b) {
            self.scan_name();
            TokenKind::Name
        } else if b.is_ascii_digit() {
            self.scan_number();
            TokenKind::Number
        } else if is_space_tab(b) {
            self.cursor.eat_while(is_space_tab);
            TokenKind::SpaceTab
        } else if self.cursor.at_line_end() {
            self.cursor.eat(b'\r');
            self.cursor.advance();
            TokenKind::Newline
        } else {
            self.cursor.advance_char();
            TokenKind::Other
        }
    }
}
