//! cfl-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the small set of types shared by every phase of the
//! cfl front end:
//!
//! - [`span`] - byte ranges into a buffer and per-file line indexes
//! - [`diagnostic`] - severity levels, codes, the diagnostic sink and the
//!   default collecting [`Handler`]
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. SPANS NEVER OWN TEXT
//!    A [`Span`] is only an offset pair. Whoever hands out a span also owns
//!    the buffer it points into, and resolves it back to text.
//!
//! 2. DIAGNOSTICS NEVER FAIL THE CALLER
//!    Reporting through a [`DiagnosticSink`] takes `&self`, returns nothing
//!    and cannot panic, so any phase can report from any depth.
//
// ============================================================================
// LOCATIONS
// ============================================================================
//
// Two coordinate systems are in play for every token:
//
// ```
// original text:    a\<nl>bc /* x */ d
//                   ^^^^^^^^ unmerged span of the name token "abc"
// normalized text:  abc   d
//                   ^^^ span of the name token
// ```
//
// Line and column numbers reported to users are always computed against the
// ORIGINAL text through a [`SourceFile`] line index, so that spliced lines
// and stripped multi-line comments do not shift reported positions.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticBuilder, DiagnosticCode, DiagnosticSink, Handler, Level, Location,
};
pub use span::{SourceFile, Span};

#[cfg(test)]
mod edge_cases;
