//! Edge case tests for cfl-pp

#[cfg(test)]
mod tests {
    use cfl_lex::Lexer;
    use cfl_util::{DiagnosticCode, Handler};

    use crate::{MemoryLoader, PreprocessError, Preprocessor, PreprocessorConfig};

    /// Runs `src` as `main.c` and returns the non-whitespace output tokens,
    /// the run result and the handler.
    fn run_with(
        src: &str,
        loader: MemoryLoader,
        config: PreprocessorConfig,
    ) -> (Vec<String>, Result<(), PreprocessError>, Handler) {
        let handler = Handler::new();
        let (words, result) = {
            let mut pp = Preprocessor::new(&handler, config).with_loader(loader);
            let result = pp.preprocess(&Lexer::lex(src, "main.c"));
            let words = pp
                .output_tokens()
                .iter()
                .filter(|t| !t.is_whitespace())
                .map(|t| t.text().to_string())
                .collect();
            (words, result)
        };
        (words, result, handler)
    }

    fn run(src: &str) -> (Vec<String>, Handler) {
        let (words, result, handler) =
            run_with(src, MemoryLoader::new(), PreprocessorConfig::default());
        assert!(result.is_ok(), "unexpected abort: {:?}", result);
        (words, handler)
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_input() {
        let (words, handler) = run("");
        assert!(words.is_empty());
        assert_eq!(handler.diagnostics().len(), 0);
    }

    #[test]
    fn test_edge_directive_without_trailing_newline() {
        let (words, _) = run("#define A 1\nA\n#undef A");
        assert_eq!(words, vec!["1"]);
    }

    #[test]
    fn test_edge_empty_object_macro() {
        let (words, _) = run("#define EMPTY\na EMPTY b\n");
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_edge_space_before_paren_makes_object_macro() {
        let (words, _) = run("#define F (x)\nF(1)\n");
        assert_eq!(words, vec!["(", "x", ")", "(", "1", ")"]);
    }

    #[test]
    fn test_edge_function_macro_without_call() {
        let (words, handler) = run("#define F(x) x\nint F;\n");
        assert_eq!(words, vec!["int", "F", ";"]);
        assert_eq!(handler.diagnostics().len(), 0);
    }

    #[test]
    fn test_edge_zero_param_call() {
        let (words, handler) = run("#define Z() 0\nZ() Z( )\n");
        assert_eq!(words, vec!["0", "0"]);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_one_param_empty_arg() {
        let (words, handler) = run("#define ONE(x) [x]\nONE()\n");
        assert_eq!(words, vec!["[", "]"]);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_zero_param_with_arg_is_arity_error() {
        let (words, handler) = run("#define Z() 0\nZ(1)\n");
        assert_eq!(words, vec!["Z", "(", "1", ")"]);
        assert!(handler.has_code(DiagnosticCode::MACRO_ARITY));
    }

    #[test]
    fn test_edge_unterminated_call() {
        let (words, handler) = run("#define F(x) x\nF(1, 2\n");
        assert_eq!(words, vec!["F", "(", "1", ",", "2"]);
        assert!(handler.has_code(DiagnosticCode::UNTERMINATED_MACRO_CALL));
    }

    #[test]
    fn test_edge_call_spans_lines() {
        let (words, _) = run("#define ADD(a, b) a+b\nADD(1,\n 2)\n");
        assert_eq!(words, vec!["1", "+", "2"]);
    }

    #[test]
    fn test_edge_mutual_recursion_terminates() {
        let (words, _) = run("#define A B\n#define B A\nA B\n");
        assert_eq!(words, vec!["A", "B"]);
    }

    #[test]
    fn test_edge_redefinition_replaces() {
        let (words, _) = run("#define V 1\n#define V 2\nV\n");
        assert_eq!(words, vec!["2"]);
    }

    #[test]
    fn test_edge_undef_absent_is_silent() {
        let (_, handler) = run("#undef NOTHING\n");
        assert_eq!(handler.diagnostics().len(), 0);
    }

    #[test]
    fn test_edge_define_missing_name() {
        let (_, handler) = run("#define\n#define 1 2\n");
        assert_eq!(handler.error_count(), 2);
        assert!(handler.has_code(DiagnosticCode::DIRECTIVE_SYNTAX));
    }

    #[test]
    fn test_edge_duplicate_param() {
        let (words, handler) = run("#define F(a, a) a\nF(1, 2)\n");
        assert!(handler.has_code(DiagnosticCode::DIRECTIVE_SYNTAX));
        assert_eq!(words, vec!["F", "(", "1", ",", "2", ")"]);
    }

    #[test]
    fn test_edge_unknown_directive_warns() {
        let (words, handler) = run("#pragma once\n#warning hi\nx\n");
        assert_eq!(words, vec!["x"]);
        assert_eq!(handler.warning_count(), 2);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_unknown_directive_inside_false_block_is_silent() {
        let (_, handler) = run("#ifdef NOPE\n#pragma once\n#endif\n");
        assert_eq!(handler.diagnostics().len(), 0);
    }

    #[test]
    fn test_edge_define_inside_false_block_ignored() {
        let (words, _) = run("#ifdef NOPE\n#define A 1\n#endif\nA\n");
        assert_eq!(words, vec!["A"]);
    }

    #[test]
    fn test_edge_nested_conditionals() {
        let src = "#define OUTER\n\
                   #ifdef OUTER\n\
                   #ifndef INNER\n\
                   yes\n\
                   #else\n\
                   no1\n\
                   #endif\n\
                   #else\n\
                   no2\n\
                   #endif\n";
        let (words, _) = run(src);
        assert_eq!(words, vec!["yes"]);
    }

    #[test]
    fn test_edge_else_inside_skipped_nesting() {
        let src = "#ifdef NOPE\n#ifdef ALSO\n#else\nhidden\n#endif\n#else\nshown\n#endif\n";
        let (words, _) = run(src);
        assert_eq!(words, vec!["shown"]);
    }

    #[test]
    fn test_edge_if_is_unsupported_and_skipped() {
        let (words, handler) = run("#if 1\na\n#else\nb\n#endif\nc\n");
        assert_eq!(words, vec!["c"]);
        assert!(handler.has_code(DiagnosticCode::UNSUPPORTED_DIRECTIVE));
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn test_edge_elif_suppresses_rest() {
        let (words, handler) = run("#ifdef NOPE\na\n#elif X\nb\n#else\nc\n#endif\nd\n");
        assert_eq!(words, vec!["d"]);
        assert!(handler.has_code(DiagnosticCode::UNSUPPORTED_DIRECTIVE));
    }

    #[test]
    fn test_edge_stray_else_and_endif() {
        let (words, handler) = run("a\n#else\nb\n#endif\nc\n");
        assert_eq!(words, vec!["a", "b", "c"]);
        assert_eq!(handler.error_count(), 2);
        assert!(handler.has_code(DiagnosticCode::UNBALANCED_CONDITIONAL));
    }

    #[test]
    fn test_edge_duplicate_else() {
        let (words, handler) = run("#ifdef NOPE\na\n#else\nb\n#else\nc\n#endif\n");
        assert_eq!(words, vec!["b", "c"]);
        assert!(handler.has_code(DiagnosticCode::UNBALANCED_CONDITIONAL));
    }

    #[test]
    fn test_edge_ifdef_without_name() {
        let (words, handler) = run("#ifdef\na\n#else\nb\n#endif\n");
        assert!(words.is_empty());
        assert!(handler.has_code(DiagnosticCode::DIRECTIVE_SYNTAX));
    }

    #[test]
    fn test_edge_unterminated_conditional_aborts() {
        let (words, result, handler) = run_with(
            "#ifdef NOPE\na\n",
            MemoryLoader::new(),
            PreprocessorConfig::default(),
        );
        assert!(words.is_empty());
        assert!(matches!(
            result,
            Err(PreprocessError::UnterminatedConditional { open: 1, .. })
        ));
        assert!(handler.has_code(DiagnosticCode::UNTERMINATED_CONDITIONAL));
    }

    #[test]
    fn test_edge_include_cannot_close_includer_frame() {
        let loader = MemoryLoader::new().with_file("inc.h", "#endif\n");
        let (words, result, handler) = run_with(
            "#ifdef NOPE\n#include \"inc.h\"\n#endif\nafter\n",
            loader,
            PreprocessorConfig::default(),
        );
        // The include sits in a false block, so it is never read.
        assert!(result.is_ok());
        assert_eq!(words, vec!["after"]);
        assert_eq!(handler.diagnostics().len(), 0);

        let loader = MemoryLoader::new().with_file("inc.h", "#endif\n");
        let (words, result, handler) = run_with(
            "#define YES\n#ifdef YES\n#include \"inc.h\"\ninside\n#endif\nafter\n",
            loader,
            PreprocessorConfig::default(),
        );
        assert!(result.is_ok());
        assert_eq!(words, vec!["inside", "after"]);
        assert!(handler.has_code(DiagnosticCode::UNBALANCED_CONDITIONAL));
    }

    #[test]
    fn test_edge_include_leftover_frame_closed() {
        let loader = MemoryLoader::new().with_file("inc.h", "#ifdef NOPE\nhidden\n");
        let (words, result, handler) =
            run_with("#include \"inc.h\"\nvisible\n", loader, PreprocessorConfig::default());
        assert!(result.is_ok());
        assert_eq!(words, vec!["visible"]);
        assert!(handler.has_code(DiagnosticCode::UNTERMINATED_CONDITIONAL));
    }

    #[test]
    fn test_edge_self_include_is_skipped() {
        let loader = MemoryLoader::new().with_file("a.h", "a\n#include \"a.h\"\n");
        let (words, result, handler) =
            run_with("#include \"a.h\"\n", loader, PreprocessorConfig::default());
        assert!(result.is_ok());
        assert_eq!(words, vec!["a"]);
        assert!(handler.has_code(DiagnosticCode::RECURSIVE_INCLUDE));
    }

    #[test]
    fn test_edge_include_depth_limit() {
        let loader = MemoryLoader::new()
            .with_file("a.h", "a\n#include \"b.h\"\n")
            .with_file("b.h", "b\n#include \"c.h\"\n")
            .with_file("c.h", "c\n");
        let config = PreprocessorConfig {
            max_include_depth: 2,
            ..PreprocessorConfig::default()
        };
        let (words, result, handler) = run_with("#include \"a.h\"\n", loader, config);
        assert!(result.is_ok());
        assert_eq!(words, vec!["a"]);
        assert!(handler.has_code(DiagnosticCode::RECURSIVE_INCLUDE));
    }

    #[test]
    fn test_edge_malformed_include() {
        let (_, handler) = run("#include\n#include <a.h\n#include foo\n");
        assert_eq!(handler.error_count(), 3);
    }

    #[test]
    fn test_edge_diagnostic_location_is_original_line() {
        let (_, handler) = run("/* two\nlines */\n#define F(x) x\nF(1,\\\n2)\n");
        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 1);
        let location = diags[0].location.clone().expect("location");
        assert_eq!((location.file.as_str(), location.line, location.column), ("main.c", 4, 1));
    }
}
