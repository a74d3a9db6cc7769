//! cfl-lex - C-family Lexical Analyzer
//!
//! This crate turns raw C-family source text (C, HLSL/GLSL-style effect
//! files, headers) into an ordered sequence of classified tokens. It is the
//! base layer for the preprocessor in `cfl-pp`; it knows nothing about
//! keywords or grammar.
//!
//! # Overview
//!
//! Lexing happens in two passes over every source unit:
//!
//! 1. **Normalization** - every backslash-newline pair is deleted (line
//!    splice) and every comment is replaced by exactly one space. The result
//!    is a new buffer the lexer owns.
//! 2. **Scanning** - the normalized buffer is cut into tokens. Every byte
//!    belongs to exactly one token and no token is empty, so concatenating
//!    the token texts gives back the normalized buffer.
//!
//! Tokens are zero-copy views: each one holds a shared handle to the buffer
//! it came from plus a byte span, so a token can never outlive its text.
//!
//! # Example Usage
//!
//! ```
//! use cfl_lex::{Lexer, TokenKind};
//!
//! let lexer = Lexer::lex("float4 /* tint */ c;\n", "shader.effect");
//! let kinds: Vec<TokenKind> = lexer.tokens().iter().map(|t| t.kind()).collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Name,
//!         TokenKind::SpaceTab,
//!         TokenKind::Name,
//!         TokenKind::Other,
//!         TokenKind::Newline,
//!     ]
//! );
//! assert_eq!(lexer.normalized(), "float4   c;\n");
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Token kinds and the token view type
//! - [`source`] - The buffers a lexer owns and tokens point into
//! - [`lexer`] - Normalization and scanning
//! - [`cursor`] - Byte cursor over the normalized buffer
//! - [`chars`] - Character classes used by the scanner
//! - [`literal`] - Escape decoding for string tokens

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod chars;
pub mod cursor;
pub mod lexer;
pub mod literal;
pub mod source;
pub mod token;

pub use cursor::Cursor;
pub use lexer::{lex, Lexer};
pub use literal::{decode_literal, decode_literal_bytes};
pub use source::SourceText;
pub use token::{Token, TokenKind};

static_assertions::assert_impl_all!(Token: Send, Sync, Clone);
static_assertions::assert_impl_all!(Lexer: Send, Sync);

#[cfg(test)]
mod edge_cases;
