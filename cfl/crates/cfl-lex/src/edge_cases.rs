//! Edge case tests for cfl-lex

#[cfg(test)]
mod tests {
    use crate::{decode_literal, lex, Lexer, Token, TokenKind};

    fn lex_all(source: &str) -> Vec<Token> {
        Lexer::lex(source, "edge.c").into_tokens()
    }

    fn joined(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text()).collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_spliced_name() {
        let t = lex_all("abc\\\ndef");
        assert_eq!(t.len(), 1);
        assert!(t[0].is_name("abcdef"));
    }

    #[test]
    fn test_edge_splice_at_end_of_input() {
        let t = lex_all("a\\\n");
        assert_eq!(t.len(), 1);
        assert!(t[0].is_name("a"));
    }

    #[test]
    fn test_edge_only_splices() {
        assert!(lex_all("\\\n\\\r\n").is_empty());
    }

    #[test]
    fn test_edge_spliced_number_and_string() {
        let t = lex_all("1\\\n2 \"a\\\nb\"");
        assert_eq!(t[0].text(), "12");
        assert_eq!(t[2].kind(), TokenKind::String);
        assert_eq!(t[2].text(), "\"ab\"");
        assert_eq!(t[2].unmerged_text(), "\"a\\\nb\"");
    }

    #[test]
    fn test_edge_unterminated_comment_keeps_prefix() {
        let (tokens, eof) = lex("int a;\n/* no end\nint b;", "eof.c");
        assert!(eof);
        assert_eq!(joined(&tokens), "int a;\n");
    }

    #[test]
    fn test_edge_unterminated_comment_at_start() {
        let (tokens, eof) = lex("/*", "eof.c");
        assert!(eof);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_edge_comment_only() {
        let t = lex_all("// just a comment");
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].kind(), TokenKind::SpaceTab);
        assert_eq!(t[0].unmerged_text(), "// just a comment");
    }

    #[test]
    fn test_edge_comments_do_not_nest() {
        let t = lex_all("/* /* */ x */");
        assert_eq!(joined(&t), "  x */");
    }

    #[test]
    fn test_edge_division_is_not_a_comment() {
        let t = lex_all("a/b");
        assert_eq!(t.len(), 3);
        assert!(t[1].is_other('/'));
    }

    #[test]
    fn test_edge_long_name() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("{} = 1;", name));
        assert!(t[0].is_name(&name));
    }

    #[test]
    fn test_edge_non_ascii_is_one_other_each() {
        let t = lex_all("ü€");
        assert_eq!(t.len(), 2);
        assert!(t.iter().all(|t| t.kind() == TokenKind::Other));
    }

    #[test]
    fn test_edge_control_characters() {
        let t = lex_all("\0\x0b\x0c");
        assert_eq!(t.len(), 3);
        assert!(t.iter().all(|t| t.kind() == TokenKind::Other));
    }

    #[test]
    fn test_edge_location_after_multiline_comment() {
        let t = lex_all("/* one\ntwo\nthree */ x");
        let x = t.iter().find(|t| t.is_name("x")).cloned();
        let x = x.expect("x token");
        assert_eq!(x.location().line, 3);
        assert_eq!(x.location().column, 10);
    }

    #[test]
    fn test_edge_decode_string_token() {
        let t = lex_all("\"a\\x42\\n\"");
        assert_eq!(decode_literal(t[0].text()), "aB\n");
    }

    #[test]
    fn test_edge_joined_tokens_from_angle_path() {
        let t = lex_all("<sys/io.h>");
        let mut path = t[1].clone();
        for next in &t[2..t.len() - 1] {
            path = path.join(next).expect("adjacent");
        }
        assert_eq!(path.text(), "sys/io.h");
        assert_eq!(path.kind(), TokenKind::Name);
    }
}
