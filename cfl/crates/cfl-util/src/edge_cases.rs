//! Edge case tests for cfl-util

#[cfg(test)]
mod tests {
    use crate::{Diagnostic, DiagnosticSink, Handler, Location, SourceFile};

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_crlf_line_index() {
        let file = SourceFile::new("crlf.c", "a\r\nb\r\n");
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.offset_to_line_col(3), (2, 1));
        assert_eq!(file.offset_to_line_col(1), (1, 2));
    }

    #[test]
    fn test_edge_offset_past_end_clamps_to_last_line() {
        let file = SourceFile::new("a.c", "ab\ncd");
        assert_eq!(file.offset_to_line_col(100), (2, 98));
    }

    #[test]
    fn test_edge_handler_many_reports() {
        let handler = Handler::new();
        for i in 0..1000 {
            handler.report(Diagnostic::warning(format!("w{}", i)));
        }
        assert_eq!(handler.warning_count(), 1000);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_location_display_with_spaces_in_name() {
        let loc = Location::new("my file.c", 10, 2);
        assert_eq!(loc.to_string(), "my file.c (10, 2)");
    }
}
