//! Macro substitution.
//!
//! A substitution replaces a macro name (plus its argument list for a
//! function-like macro) with the macro body, then rescans that body once
//! for further macro names. While a macro's body is being rescanned its
//! name sits on the `expanding` guard and is never expanded again, so
//! self-referential macros terminate.

use cfl_lex::{Token, TokenKind};
use cfl_util::DiagnosticCode;
use tracing::trace;

use crate::preprocessor::{skip_space, trim_whitespace, Preprocessor};

/// Arguments of a call and the index of its closing `)`.
type CallArgs = (Vec<Vec<Token>>, usize);

impl Preprocessor<'_> {
    /// Expands the name token at `tokens[pos]`.
    ///
    /// Returns the tokens to emit and the index just past everything that
    /// was consumed.
    pub(crate) fn expand_at(&mut self, tokens: &[Token], pos: usize) -> (Vec<Token>, usize) {
        let name = &tokens[pos];
        let unchanged = || (vec![name.clone()], pos + 1);

        if self.expanding.contains(name.text()) {
            return unchanged();
        }
        let Some(def) = self.macros.lookup(name.text()).cloned() else {
            return unchanged();
        };

        let (replacement, next) = if def.is_function_like() {
            let open = skip_space(tokens, pos + 1);
            if !tokens.get(open).is_some_and(|t| t.is_other('(')) {
                return unchanged();
            }

            let Some((mut args, close)) = collect_args(tokens, open) else {
                self.report_error(
                    name,
                    DiagnosticCode::UNTERMINATED_MACRO_CALL,
                    format!("unterminated call to macro '{}'", def.name()),
                );
                return unchanged();
            };

            // `F()` passes no arguments to a macro without parameters.
            if def.params().is_empty() && args.len() == 1 && args[0].is_empty() {
                args.clear();
            }

            if args.len() != def.params().len() {
                self.report_error(
                    name,
                    DiagnosticCode::MACRO_ARITY,
                    format!(
                        "macro '{}' called with {} argument(s), expected {}",
                        def.name(),
                        args.len(),
                        def.params().len()
                    ),
                );
                return (tokens[pos..=close].to_vec(), close + 1);
            }

            (def.substitute(&args), close + 1)
        } else {
            (def.body().to_vec(), pos + 1)
        };

        trace!(name = def.name(), depth = self.expanding.len(), "expand macro");
        self.expanding.insert(def.name().to_string());
        let expanded = self.rescan(&replacement);
        self.expanding.pop();

        (expanded, next)
    }

    /// Expands every macro name in `tokens`, once.
    fn rescan(&mut self, tokens: &[Token]) -> Vec<Token> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].kind() == TokenKind::Name {
                let (expanded, next) = self.expand_at(tokens, i);
                out.extend(expanded);
                i = next;
            } else {
                out.push(tokens[i].clone());
                i += 1;
            }
        }
        out
    }
}

/// Collects the comma-separated arguments of a call whose `(` is at
/// `tokens[open]`. Commas inside nested parentheses do not split. Each
/// argument is trimmed of surrounding whitespace.
///
/// Returns `None` if the input ends before the matching `)`.
fn collect_args(tokens: &[Token], open: usize) -> Option<CallArgs> {
    let mut args = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        if token.is_other('(') {
            depth += 1;
        } else if token.is_other(')') {
            if depth == 0 {
                args.push(trim_whitespace(&current).to_vec());
                return Some((args, i));
            }
            depth -= 1;
        } else if token.is_other(',') && depth == 0 {
            args.push(trim_whitespace(&current).to_vec());
            current.clear();
            continue;
        }
        current.push(token.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreprocessorConfig;
    use cfl_lex::Lexer;
    use cfl_util::Handler;

    fn spell(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text()).collect()
    }

    fn args_of(src: &str) -> Option<Vec<String>> {
        let tokens = Lexer::lex(src, "a.c").into_tokens();
        let open = tokens.iter().position(|t| t.is_other('('))?;
        collect_args(&tokens, open).map(|(args, _)| args.iter().map(|a| spell(a)).collect())
    }

    #[test]
    fn test_collect_args_nested() {
        assert_eq!(
            args_of("M(f(a, b), (c), d)"),
            Some(vec!["f(a, b)".to_string(), "(c)".to_string(), "d".to_string()])
        );
    }

    #[test]
    fn test_collect_args_trims_and_keeps_empty() {
        assert_eq!(
            args_of("M( a ,\n b , )"),
            Some(vec!["a".to_string(), "b".to_string(), String::new()])
        );
        assert_eq!(args_of("M()"), Some(vec![String::new()]));
    }

    #[test]
    fn test_collect_args_unterminated() {
        assert_eq!(args_of("M(a, (b)"), None);
    }

    #[test]
    fn test_expand_at_guard() {
        let handler = Handler::new();
        let mut pp = crate::Preprocessor::new(&handler, PreprocessorConfig::default());
        pp.define("A", "A + 1").unwrap();
        let tokens = Lexer::lex("A", "g.c").into_tokens();
        let (out, next) = pp.expand_at(&tokens, 0);
        assert_eq!(spell(&out), "A + 1");
        assert_eq!(next, 1);
        assert!(pp.expanding.is_empty());
    }

    #[test]
    fn test_expand_at_unknown_name() {
        let handler = Handler::new();
        let mut pp = crate::Preprocessor::new(&handler, PreprocessorConfig::default());
        let tokens = Lexer::lex("x y", "g.c").into_tokens();
        let (out, next) = pp.expand_at(&tokens, 0);
        assert_eq!(spell(&out), "x");
        assert_eq!(next, 1);
    }
}
