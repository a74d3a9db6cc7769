//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! Every phase reports problems through the [`DiagnosticSink`] trait. The
//! default sink, [`Handler`], simply collects what it receives so callers can
//! inspect or render it afterwards.
//!
//! # Examples
//!
//! ```
//! use cfl_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler, Location};
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("expected macro name")
//!     .code(DiagnosticCode::DIRECTIVE_SYNTAX)
//!     .location(Location::new("shader.effect", 3, 9))
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! assert_eq!(
//!     handler.render(),
//!     "shader.effect (3, 9): error: expected macro name\n"
//! );
//! ```

mod builder;
mod codes;

pub use builder::DiagnosticBuilder;
pub use codes::DiagnosticCode;

use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level
///
/// # Examples
///
/// ```
/// use cfl_util::diagnostic::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A problem that makes the output unreliable
    Error,
    /// A suspicious construct that was handled
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// File, line and column a diagnostic points at
///
/// Line and column are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// File label as given to the lexer
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in bytes)
    pub column: usize,
}

impl Location {
    /// Create a new location
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.file, self.line, self.column)
    }
}

/// A diagnostic message with severity and location
///
/// # Examples
///
/// ```
/// use cfl_util::diagnostic::{Diagnostic, Level};
///
/// let diag = Diagnostic::error("something went wrong");
/// assert_eq!(diag.level, Level::Error);
/// assert!(diag.location.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Where the problem was found, if known
    pub location: Option<Location>,
    /// Optional diagnostic code
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            location: None,
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Receiver of structured diagnostics
///
/// Implementations must not block and must not fail the caller.
pub trait DiagnosticSink {
    /// Record one diagnostic
    fn report(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Handler for collecting and reporting diagnostics
///
/// The `Handler` collects diagnostics and provides methods for querying
/// their counts. It takes `&self` everywhere so a single handler can be
/// shared by every phase of one job.
///
/// # Examples
///
/// ```
/// use cfl_util::diagnostic::{Diagnostic, DiagnosticSink, Handler};
///
/// let handler = Handler::new();
/// handler.report(Diagnostic::warning("unused macro"));
///
/// assert!(!handler.has_errors());
/// assert_eq!(handler.warning_count(), 1);
/// ```
#[derive(Default)]
pub struct Handler {
    /// Collected diagnostics
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(Level::Warning)
    }

    fn count(&self, level: Level) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    /// Get all diagnostics, in the order they were reported
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Check whether a diagnostic with the given code was reported
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.code == Some(code))
    }

    /// Render every diagnostic, one per line
    ///
    /// Format: `file (line, column): level: message`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diagnostic in self.diagnostics.borrow().iter() {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        out
    }

    /// Clear all diagnostics
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl DiagnosticSink for Handler {
    fn report(&self, diagnostic: Diagnostic) {
        self.emit_diagnostic(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
    }

    #[test]
    fn test_diagnostic_display_without_location() {
        let diag = Diagnostic::error("bad thing");
        assert_eq!(diag.to_string(), "error: bad thing");
    }

    #[test]
    fn test_diagnostic_display_with_location() {
        let diag = Diagnostic::warning("odd").with_location(Location::new("a.c", 2, 7));
        assert_eq!(diag.to_string(), "a.c (2, 7): warning: odd");
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::error("test").with_code(DiagnosticCode::MACRO_ARITY);
        assert_eq!(diag.code, Some(DiagnosticCode::MACRO_ARITY));
    }

    #[test]
    fn test_handler_new() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
        assert_eq!(handler.warning_count(), 0);
        assert_eq!(handler.render(), "");
    }

    #[test]
    fn test_handler_counts_by_level() {
        let handler = Handler::new();
        handler.report(Diagnostic::error("one"));
        handler.report(Diagnostic::warning("two"));
        handler.report(Diagnostic::error("three"));

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 2);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.diagnostics().len(), 3);
    }

    #[test]
    fn test_handler_has_code() {
        let handler = Handler::new();
        handler.report(Diagnostic::error("x").with_code(DiagnosticCode::INCLUDE_NOT_FOUND));
        assert!(handler.has_code(DiagnosticCode::INCLUDE_NOT_FOUND));
        assert!(!handler.has_code(DiagnosticCode::MACRO_ARITY));
    }

    #[test]
    fn test_handler_render_keeps_order() {
        let handler = Handler::new();
        handler.report(Diagnostic::error("first").with_location(Location::new("a", 1, 1)));
        handler.report(Diagnostic::warning("second"));
        assert_eq!(handler.render(), "a (1, 1): error: first\nwarning: second\n");
    }

    #[test]
    fn test_handler_clear() {
        let handler = Handler::new();
        handler.report(Diagnostic::error("test"));
        handler.clear();
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_sink_through_reference() {
        fn report_via(sink: &dyn DiagnosticSink) {
            sink.report(Diagnostic::warning("via dyn"));
        }
        let handler = Handler::new();
        report_via(&handler);
        report_via(&&handler);
        assert_eq!(handler.warning_count(), 2);
    }
}
