//! cfl-pp - Macro Preprocessor for C-family Sources
//!
//! This crate runs the directive layer on top of `cfl-lex` tokens:
//! `#define`, `#undef`, `#ifdef`, `#ifndef`, `#else`, `#endif` and
//! `#include`, with object-like and function-like macro expansion. The
//! result is one flat token sequence for a downstream grammar.
//!
//! # Overview
//!
//! ```text
//! root text --Lexer--> tokens --Preprocessor--> output tokens
//!                                  |    ^
//!                       #include   v    | tokens of included files
//!                               FileLoader --Lexer--> dependency lexers
//! ```
//!
//! Problems are reported through a [`cfl_util::DiagnosticSink`]. Only a
//! missing quoted include, a missing angle include (when configured fatal)
//! and conditional blocks left open at the end of the root abort a run.
//!
//! Not supported: `#if`/`#elif` expressions, `defined()`, the `#` and `##`
//! operators and variadic macros. `#if` and `#elif` are reported and their
//! blocks skipped.
//!
//! # Example Usage
//!
//! ```
//! use cfl_lex::Lexer;
//! use cfl_pp::{MemoryLoader, Preprocessor, PreprocessorConfig};
//! use cfl_util::Handler;
//!
//! let loader = MemoryLoader::new().with_file("inc.h", "#define Y 42\n");
//! let root = Lexer::lex("#include \"inc.h\"\nY\n", "main.c");
//!
//! let handler = Handler::new();
//! let mut pp = Preprocessor::new(&handler, PreprocessorConfig::default()).with_loader(loader);
//! pp.preprocess(&root).unwrap();
//!
//! let names: Vec<&str> = pp.output_tokens().iter().map(|t| t.text()).collect();
//! assert_eq!(names, vec!["42", "\n"]);
//! ```
//!
//! # Module Structure
//!
//! - [`preprocessor`] - The engine and its public API
//! - [`macros`] - Macro definitions and the macro table
//! - [`cond`] - Conditional-frame state machine
//! - [`loader`] - File access for `#include`
//! - [`config`] - Configuration, loadable from TOML
//! - [`error`] - Error types

#![warn(missing_docs)]

pub mod cond;
pub mod config;
mod directive;
pub mod error;
mod expand;
pub mod loader;
pub mod macros;
pub mod preprocessor;

pub use cond::{ConditionalError, ConditionalStack, Frame, FrameState};
pub use config::{PreprocessorConfig, DEFAULT_MAX_INCLUDE_DEPTH};
pub use error::{ConfigError, PreprocessError, Result};
pub use loader::{FileLoader, FsLoader, MemoryLoader};
pub use macros::{MacroDefinition, MacroTable};
pub use preprocessor::{Preprocessor, PREDEFINED_FILE};

static_assertions::assert_impl_all!(MacroDefinition: Send, Sync, Clone);
static_assertions::assert_impl_all!(PreprocessorConfig: Send, Sync);
static_assertions::assert_impl_all!(MemoryLoader: FileLoader, Send, Sync);

#[cfg(test)]
mod edge_cases;
