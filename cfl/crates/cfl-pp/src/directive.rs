//! Directive handling.
//!
//! `define`, `undef` and `include` only take effect while the current frame
//! is active. Conditional directives are always tracked so nesting stays
//! balanced inside suppressed regions.

use std::path::{Path, PathBuf};

use cfl_lex::{Token, TokenKind};
use cfl_util::DiagnosticCode;
use tracing::{debug, warn};

use crate::cond::{ConditionalError, FrameState};
use crate::error::{PreprocessError, Result};
use crate::macros::MacroDefinition;
use crate::preprocessor::{skip_space, trim_whitespace, Preprocessor};

/// Form of an `#include` operand.
#[derive(Debug, PartialEq, Eq)]
enum IncludeTarget {
    /// `"path"`, resolved against the including file.
    Quoted(String),
    /// `<path>`, searched in the system include directories.
    System(String),
}

impl Preprocessor<'_> {
    /// Handles one directive line. `name` is the directive name after `#`,
    /// `args` the tokens after it up to but not including the newline.
    pub(crate) fn directive(
        &mut self,
        name: &Token,
        args: &[Token],
        file: &Path,
        floor: usize,
    ) -> Result<()> {
        match name.text() {
            "ifdef" => self.conditional(name, args, false),
            "ifndef" => self.conditional(name, args, true),
            "if" => {
                if self.cond.is_active() {
                    self.report_error(
                        name,
                        DiagnosticCode::UNSUPPORTED_DIRECTIVE,
                        "#if is not supported; the block is skipped",
                    );
                }
                self.cond.push_suppressed(name.clone());
            },
            "elif" => match self.cond.suppress_top(floor) {
                Ok(FrameState::InactiveBranchTaken) => {},
                Ok(_) => self.report_error(
                    name,
                    DiagnosticCode::UNSUPPORTED_DIRECTIVE,
                    "#elif is not supported; the rest of the block is skipped",
                ),
                Err(err) => self.conditional_error(name, err),
            },
            "else" => {
                if let Err(err) = self.cond.flip_else(floor) {
                    self.conditional_error(name, err);
                }
            },
            "endif" => {
                if let Err(err) = self.cond.pop(floor) {
                    self.conditional_error(name, err);
                }
            },
            _ if !self.cond.is_active() => {},
            "define" => self.define_directive(name, args),
            "undef" => self.undef_directive(name, args),
            "include" => return self.include_directive(name, args, file),
            other => {
                let message = format!("unknown directive '#{}' ignored", other);
                self.report_warning(name, DiagnosticCode::UNKNOWN_DIRECTIVE, message);
            },
        }
        Ok(())
    }

    fn conditional_error(&self, at: &Token, err: ConditionalError) {
        self.report_error(at, DiagnosticCode::UNBALANCED_CONDITIONAL, err.to_string());
    }

    /// `#ifdef NAME` / `#ifndef NAME`.
    fn conditional(&mut self, directive: &Token, args: &[Token], negate: bool) {
        let at = skip_space(args, 0);
        match args.get(at).filter(|t| t.kind() == TokenKind::Name) {
            Some(macro_name) => {
                let defined = self.macros.contains(macro_name.text());
                self.cond.push(defined != negate, directive.clone());
            },
            None => {
                if self.cond.is_active() {
                    self.report_error(
                        directive,
                        DiagnosticCode::DIRECTIVE_SYNTAX,
                        format!("expected macro name after #{}", directive.text()),
                    );
                }
                self.cond.push_suppressed(directive.clone());
            },
        }
    }

    /// `#define NAME body` / `#define NAME(params) body`.
    fn define_directive(&mut self, directive: &Token, args: &[Token]) {
        let at = skip_space(args, 0);
        let Some(name) = args.get(at).filter(|t| t.kind() == TokenKind::Name) else {
            self.report_error(
                directive,
                DiagnosticCode::DIRECTIVE_SYNTAX,
                "expected macro name after #define",
            );
            return;
        };

        let mut rest = at + 1;
        // A parameter list must follow the name with no space in between.
        let params = if args.get(rest).is_some_and(|t| t.is_other('(')) {
            match parse_params(args, rest + 1) {
                Ok((params, after)) => {
                    rest = after;
                    Some(params)
                },
                Err((bad, message)) => {
                    self.report_error(bad, DiagnosticCode::DIRECTIVE_SYNTAX, message);
                    return;
                },
            }
        } else {
            None
        };

        let body = trim_whitespace(&args[rest..]).to_vec();
        let def = match params {
            Some(params) => MacroDefinition::function(name.clone(), params, body),
            None => MacroDefinition::object(name.clone(), body),
        };
        if self.macros.contains(def.name()) {
            debug!(name = def.name(), "redefine macro");
        }
        self.add_define(def);
    }

    /// `#undef NAME`.
    fn undef_directive(&mut self, directive: &Token, args: &[Token]) {
        let at = skip_space(args, 0);
        match args.get(at).filter(|t| t.kind() == TokenKind::Name) {
            Some(name) => {
                self.remove_define(name.text());
            },
            None => self.report_error(
                directive,
                DiagnosticCode::DIRECTIVE_SYNTAX,
                "expected macro name after #undef",
            ),
        }
    }

    /// `#include "path"` / `#include <path>`.
    fn include_directive(&mut self, directive: &Token, args: &[Token], file: &Path) -> Result<()> {
        let target = match parse_include_target(args) {
            Ok(target) => target,
            Err(message) => {
                self.report_error(directive, DiagnosticCode::DIRECTIVE_SYNTAX, message);
                return Ok(());
            },
        };

        let resolved = match target {
            IncludeTarget::Quoted(path) => {
                let dir = file.parent().unwrap_or_else(|| Path::new(""));
                let candidate = dir.join(&path);
                match self.loader.read_file(&candidate) {
                    Ok(text) => (candidate, text),
                    Err(source) => {
                        self.report_error(
                            directive,
                            DiagnosticCode::INCLUDE_NOT_FOUND,
                            format!("cannot open include file '{}': {}", path, source),
                        );
                        return Err(PreprocessError::IncludeNotFound {
                            path: candidate,
                            location: directive.location(),
                            source,
                        });
                    },
                }
            },
            IncludeTarget::System(path) => match self.find_system_include(&path) {
                Some(found) => found,
                None => return self.missing_system_include(directive, path),
            },
        };

        let (path, text) = resolved;
        if self.include_stack.contains(&path) {
            self.report_error(
                directive,
                DiagnosticCode::RECURSIVE_INCLUDE,
                format!("'{}' includes itself; skipped", path.display()),
            );
            return Ok(());
        }
        if self.include_stack.len() >= self.config.max_include_depth {
            self.report_error(
                directive,
                DiagnosticCode::RECURSIVE_INCLUDE,
                format!(
                    "#include nested deeper than {}; '{}' skipped",
                    self.config.max_include_depth,
                    path.display()
                ),
            );
            return Ok(());
        }

        self.process_included(path, &text)
    }

    /// Searches the system include directories in order.
    fn find_system_include(&self, path: &str) -> Option<(PathBuf, String)> {
        self.config.system_include_dirs.iter().find_map(|dir| {
            let candidate = dir.join(path);
            self.loader
                .read_file(&candidate)
                .ok()
                .map(|text| (candidate, text))
        })
    }

    fn missing_system_include(&self, directive: &Token, path: String) -> Result<()> {
        let message = format!("system include <{}> not found", path);
        if self.config.missing_system_include_is_fatal {
            self.report_error(directive, DiagnosticCode::INCLUDE_NOT_FOUND, message);
            return Err(PreprocessError::SystemIncludeNotFound {
                path,
                location: directive.location(),
            });
        }
        warn!(path = %path, "system include not found");
        self.report_warning(directive, DiagnosticCode::INCLUDE_NOT_FOUND, message);
        Ok(())
    }
}

/// Parses a parameter list starting just after `(`. Returns the parameter
/// names and the index just past `)`.
fn parse_params(
    args: &[Token],
    from: usize,
) -> std::result::Result<(Vec<Token>, usize), (&Token, String)> {
    let open = &args[from - 1];
    let mut params: Vec<Token> = Vec::new();
    let mut i = skip_space(args, from);

    if args.get(i).is_some_and(|t| t.is_other(')')) {
        return Ok((params, i + 1));
    }

    loop {
        let Some(param) = args.get(i).filter(|t| t.kind() == TokenKind::Name) else {
            return Err((
                args.get(i).unwrap_or(open),
                "expected parameter name in macro parameter list".to_string(),
            ));
        };
        if params.iter().any(|p| p.text() == param.text()) {
            return Err((param, format!("duplicate macro parameter '{}'", param.text())));
        }
        params.push(param.clone());

        i = skip_space(args, i + 1);
        match args.get(i) {
            Some(t) if t.is_other(',') => i = skip_space(args, i + 1),
            Some(t) if t.is_other(')') => return Ok((params, i + 1)),
            other => {
                return Err((
                    other.unwrap_or(param),
                    "expected ',' or ')' in macro parameter list".to_string(),
                ))
            },
        }
    }
}

/// Reads the operand of `#include`.
fn parse_include_target(args: &[Token]) -> std::result::Result<IncludeTarget, String> {
    let at = skip_space(args, 0);
    let Some(first) = args.get(at) else {
        return Err("expected \"file\" or <file> after #include".to_string());
    };

    if first.kind() == TokenKind::String && first.text().starts_with('"') {
        let text = first.text();
        return match text[1..].strip_suffix('"') {
            Some(path) if !path.is_empty() => Ok(IncludeTarget::Quoted(path.to_string())),
            Some(_) => Err("empty file name in #include".to_string()),
            None => Err("missing terminating '\"' in #include".to_string()),
        };
    }

    if first.is_other('<') {
        let Some(close) = args[at + 1..].iter().position(|t| t.is_other('>')) else {
            return Err("missing terminating '>' in #include".to_string());
        };
        let parts = &args[at + 1..at + 1 + close];
        let Some((head, tail)) = parts.split_first() else {
            return Err("empty file name in #include".to_string());
        };
        let joined = tail
            .iter()
            .try_fold(head.clone(), |acc, next| acc.join(next))
            .ok_or_else(|| "malformed file name in #include".to_string())?;
        return Ok(IncludeTarget::System(joined.text().to_string()));
    }

    Err("expected \"file\" or <file> after #include".to_string())
}
