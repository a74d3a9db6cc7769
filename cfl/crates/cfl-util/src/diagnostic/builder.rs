//! Diagnostic builder for fluent diagnostic construction.

use super::{Diagnostic, DiagnosticCode, DiagnosticSink, Level, Location};

/// Builder for constructing diagnostics with a fluent API
///
/// # Examples
///
/// ```
/// use cfl_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Level, Location};
///
/// let diag = DiagnosticBuilder::new(Level::Error, "macro called with 1 argument, expected 2")
///     .code(DiagnosticCode::MACRO_ARITY)
///     .location(Location::new("main.c", 4, 1))
///     .build();
/// assert_eq!(diag.code, Some(DiagnosticCode::MACRO_ARITY));
/// ```
#[must_use = "a diagnostic builder does nothing until built or emitted"]
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    location: Option<Location>,
    code: Option<DiagnosticCode>,
}

impl DiagnosticBuilder {
    /// Create a new builder with the given level and message
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            location: None,
            code: None,
        }
    }

    /// Start building an error
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Start building a warning
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the diagnostic code
    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the location
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the location if one is known
    pub fn maybe_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// Finish building
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            location: self.location,
            code: self.code,
        }
    }

    /// Build and hand the diagnostic to a sink
    pub fn emit(self, sink: &dyn DiagnosticSink) {
        sink.report(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Handler;

    #[test]
    fn test_builder_defaults() {
        let diag = DiagnosticBuilder::warning("w").build();
        assert_eq!(diag.level, Level::Warning);
        assert_eq!(diag.location, None);
        assert_eq!(diag.code, None);
    }

    #[test]
    fn test_builder_emit_reaches_sink() {
        let handler = Handler::new();
        DiagnosticBuilder::error("bad include")
            .code(DiagnosticCode::INCLUDE_NOT_FOUND)
            .maybe_location(Some(Location::new("root.c", 1, 10)))
            .emit(&handler);

        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].location, Some(Location::new("root.c", 1, 10)));
        assert_eq!(diags[0].code, Some(DiagnosticCode::INCLUDE_NOT_FOUND));
    }
}
