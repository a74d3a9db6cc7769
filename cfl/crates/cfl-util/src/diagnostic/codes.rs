//! Diagnostic codes for categorizing front-end errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, so tools can filter on the code rather than on the
//! message text.
//!
//! # Examples
//!
//! ```
//! use cfl_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::MACRO_ARITY;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 301);
//! assert_eq!(code.as_str(), "E0301");
//! ```

use std::fmt;

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// The hundreds digit groups codes by phase: `01xx` lexing, `02xx`
/// directives, `03xx` macro expansion, `04xx` includes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix ("E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E0101", "W0204")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXING (E01xx)
    // =========================================================================

    /// E0101: Block comment still open at end of input
    pub const UNTERMINATED_COMMENT: Self = Self::new("E", 101);

    // =========================================================================
    // DIRECTIVES (E02xx / W02xx)
    // =========================================================================

    /// E0201: Malformed directive syntax (missing name, bad parameter list)
    pub const DIRECTIVE_SYNTAX: Self = Self::new("E", 201);
    /// E0202: `#else` / `#endif` without a matching open conditional
    pub const UNBALANCED_CONDITIONAL: Self = Self::new("E", 202);
    /// E0203: Directive that is recognized but not supported (`#if`, `#elif`)
    pub const UNSUPPORTED_DIRECTIVE: Self = Self::new("E", 203);
    /// W0204: Unknown directive name, line dropped
    pub const UNKNOWN_DIRECTIVE: Self = Self::new("W", 204);
    /// E0205: Conditional still open at end of a file
    pub const UNTERMINATED_CONDITIONAL: Self = Self::new("E", 205);

    // =========================================================================
    // MACROS (E03xx)
    // =========================================================================

    /// E0301: Function-like macro called with the wrong number of arguments
    pub const MACRO_ARITY: Self = Self::new("E", 301);
    /// E0302: Function-like macro call without a closing parenthesis
    pub const UNTERMINATED_MACRO_CALL: Self = Self::new("E", 302);

    // =========================================================================
    // INCLUDES (E04xx)
    // =========================================================================

    /// E0401: Include target could not be found or read
    pub const INCLUDE_NOT_FOUND: Self = Self::new("E", 401);
    /// E0402: Include target is already being included, or nesting too deep
    pub const RECURSIVE_INCLUDE: Self = Self::new("E", 402);
}

impl fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}
