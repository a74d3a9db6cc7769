//! Lexer module.
//!
//! The lexer is split into focused components:
//! - `core` - The `Lexer` type, the scan loop and error reporting
//! - `normalize` - Splice removal and comment blanking
//! - `identifier` - Name tokens
//! - `number` - Number tokens
//! - `string` - String and character literal tokens

mod core;
mod identifier;
mod normalize;
mod number;
mod string;

pub use self::core::{lex, Lexer};
