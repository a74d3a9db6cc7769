//! The preprocessor engine.
//!
//! Walks the tokens of one source unit line by line. Lines whose first
//! non-space token is `#` are directives and produce no output; every other
//! line is text, which is macro-expanded and copied to the output while the
//! innermost conditional frame is active.
//!
//! Directive handling lives in `directive.rs`, macro substitution in
//! `expand.rs`.

use std::path::{Path, PathBuf};

use cfl_lex::{Lexer, Token, TokenKind};
use cfl_util::{DiagnosticBuilder, DiagnosticCode, DiagnosticSink};
use indexmap::IndexSet;
use tracing::debug;

use crate::cond::ConditionalStack;
use crate::config::{is_identifier, PreprocessorConfig};
use crate::error::{PreprocessError, Result};
use crate::loader::{FileLoader, FsLoader};
use crate::macros::{MacroDefinition, MacroTable};

/// File label used for tokens of defines that do not come from a source
/// file.
pub const PREDEFINED_FILE: &str = "<predefined>";

/// A macro preprocessor for one root source.
///
/// # Examples
///
/// ```
/// use cfl_lex::Lexer;
/// use cfl_pp::{Preprocessor, PreprocessorConfig};
/// use cfl_util::Handler;
///
/// let handler = Handler::new();
/// let root = Lexer::lex("#define TWO 2\nx = TWO;\n", "main.c");
///
/// let mut pp = Preprocessor::new(&handler, PreprocessorConfig::default());
/// pp.preprocess(&root).unwrap();
///
/// let text: String = pp.output_tokens().iter().map(|t| t.text()).collect();
/// assert_eq!(text, "x = 2;\n");
/// assert!(!handler.has_errors());
/// ```
pub struct Preprocessor<'s> {
    pub(crate) sink: &'s dyn DiagnosticSink,
    pub(crate) config: PreprocessorConfig,
    pub(crate) loader: Box<dyn FileLoader + 's>,
    pub(crate) macros: MacroTable,
    pub(crate) cond: ConditionalStack,
    output: Vec<Token>,
    /// Lexers of included files, kept for the preprocessor's lifetime.
    dependencies: Vec<Lexer>,
    /// Files currently being processed, outermost first.
    pub(crate) include_stack: Vec<PathBuf>,
    /// Macros currently being expanded, outermost first.
    pub(crate) expanding: IndexSet<String>,
}

impl<'s> Preprocessor<'s> {
    /// Creates a preprocessor reporting to `sink`.
    ///
    /// The config's `defines` are installed immediately; an entry whose
    /// name is not an identifier is reported and skipped.
    pub fn new(sink: &'s dyn DiagnosticSink, config: PreprocessorConfig) -> Self {
        let defines = config.defines.clone();
        let mut pp = Self {
            sink,
            config,
            loader: Box::new(FsLoader),
            macros: MacroTable::new(),
            cond: ConditionalStack::new(),
            output: Vec::new(),
            dependencies: Vec::new(),
            include_stack: Vec::new(),
            expanding: IndexSet::new(),
        };
        for (name, body) in &defines {
            if let Err(err) = pp.define(name, body) {
                DiagnosticBuilder::error(err.to_string())
                    .code(DiagnosticCode::DIRECTIVE_SYNTAX)
                    .emit(sink);
            }
        }
        pp
    }

    /// Replaces the file loader used for `#include`.
    pub fn with_loader(mut self, loader: impl FileLoader + 's) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Installs or replaces a macro.
    pub fn add_define(&mut self, def: MacroDefinition) {
        debug!(name = def.name(), "define macro");
        self.macros.define(def);
    }

    /// Defines an object-like macro from text, as if by
    /// `#define name body`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_pp::{Preprocessor, PreprocessorConfig};
    /// use cfl_util::Handler;
    ///
    /// let handler = Handler::new();
    /// let mut pp = Preprocessor::new(&handler, PreprocessorConfig::default());
    /// pp.define("WIDTH", " 640 ").unwrap();
    /// assert!(pp.is_defined("WIDTH"));
    /// assert!(pp.define("not valid", "1").is_err());
    /// ```
    pub fn define(&mut self, name: &str, body: &str) -> Result<()> {
        if !is_identifier(name) {
            return Err(PreprocessError::InvalidMacroName(name.to_string()));
        }
        let mut name_tokens = Lexer::lex(name, PREDEFINED_FILE).into_tokens();
        let name_token = name_tokens.remove(0);
        let body_tokens = Lexer::lex(body, PREDEFINED_FILE).into_tokens();
        let body = trim_whitespace(&body_tokens).to_vec();
        self.add_define(MacroDefinition::object(name_token, body));
        Ok(())
    }

    /// Removes a macro. Returns true if it was defined.
    pub fn remove_define(&mut self, name: &str) -> bool {
        debug!(name, "undefine macro");
        self.macros.undef(name).is_some()
    }

    /// Returns true if `name` is currently defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains(name)
    }

    /// The macro table.
    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Output produced so far.
    pub fn output_tokens(&self) -> &[Token] {
        &self.output
    }

    /// Consumes the preprocessor, returning its output.
    pub fn into_tokens(self) -> Vec<Token> {
        self.output
    }

    /// Lexers of every file pulled in by `#include`.
    pub fn dependencies(&self) -> &[Lexer] {
        &self.dependencies
    }

    /// Preprocesses `root`, appending to the output.
    ///
    /// Returns `Ok(())` when the whole input was processed, even if
    /// diagnostics were reported. Returns `Err` when a quoted include
    /// (or, if so configured, an angle include) cannot be read, or when
    /// conditional blocks are still open at the end of the root input.
    /// Every error is also reported to the sink.
    pub fn preprocess(&mut self, root: &Lexer) -> Result<()> {
        debug!(file = root.file(), tokens = root.tokens().len(), "preprocess");
        root.report_errors(self.sink);

        let path = PathBuf::from(root.file());
        self.include_stack.push(path.clone());
        let result = self.process_file(root.tokens(), &path);
        self.include_stack.pop();
        let open = result?;

        if open > 0 {
            return Err(PreprocessError::UnterminatedConditional {
                file: root.file().to_string(),
                open,
            });
        }
        Ok(())
    }

    /// Lexes and processes an included file. The lexer is retained.
    pub(crate) fn process_included(&mut self, path: PathBuf, text: &str) -> Result<()> {
        let lexer = Lexer::lex(text, path.display().to_string());
        lexer.report_errors(self.sink);
        let tokens = lexer.tokens().to_vec();
        self.dependencies.push(lexer);

        debug!(file = %path.display(), depth = self.include_stack.len(), "enter include");
        self.include_stack.push(path.clone());
        let result = self.process_file(&tokens, &path);
        self.include_stack.pop();
        debug!(file = %path.display(), "leave include");

        result.map(|_| ())
    }

    /// Processes the tokens of one file. Frames the file left open are
    /// reported and closed; their count is returned.
    fn process_file(&mut self, tokens: &[Token], path: &Path) -> Result<usize> {
        let floor = self.cond.depth();
        let mut i = 0;
        let mut line_start = true;

        while i < tokens.len() {
            if line_start {
                let first = skip_space(tokens, i);
                if let Some(name) = directive_name(tokens, first) {
                    let end = line_end(tokens, first);
                    let result = self.directive(&tokens[name], &tokens[name + 1..end], path, floor);
                    if let Err(err) = result {
                        self.cond.close_above(floor);
                        return Err(err);
                    }
                    i = end;
                    // newline, if any
                    if i < tokens.len() {
                        i += 1;
                    }
                    continue;
                }
            }

            let token = &tokens[i];
            if !self.cond.is_active() {
                line_start = token.is_newline();
                i += 1;
                continue;
            }

            if token.kind() == TokenKind::Name {
                let (expanded, next) = self.expand_at(tokens, i);
                self.output.extend(expanded);
                line_start = tokens[next - 1].is_newline();
                i = next;
            } else {
                self.output.push(token.clone());
                line_start = token.is_newline();
                i += 1;
            }
        }

        let leftover = self.cond.close_above(floor);
        for frame in &leftover {
            DiagnosticBuilder::error("conditional block not closed (missing #endif)")
                .code(DiagnosticCode::UNTERMINATED_CONDITIONAL)
                .maybe_location(frame.opener().map(Token::location))
                .emit(self.sink);
        }
        Ok(leftover.len())
    }

    pub(crate) fn report_error(&self, at: &Token, code: DiagnosticCode, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .location(at.location())
            .emit(self.sink);
    }

    pub(crate) fn report_warning(
        &self,
        at: &Token,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) {
        DiagnosticBuilder::warning(message)
            .code(code)
            .location(at.location())
            .emit(self.sink);
    }
}

/// Index of the first token at or after `from` that is not a space/tab run.
pub(crate) fn skip_space(tokens: &[Token], from: usize) -> usize {
    let mut i = from;
    while tokens.get(i).is_some_and(Token::is_space) {
        i += 1;
    }
    i
}

/// If `tokens[hash]` is a `#` followed (across spaces and tabs) by a name,
/// returns the index of that name.
fn directive_name(tokens: &[Token], hash: usize) -> Option<usize> {
    if !tokens.get(hash).is_some_and(|t| t.is_other('#')) {
        return None;
    }
    let name = skip_space(tokens, hash + 1);
    tokens
        .get(name)
        .is_some_and(|t| t.kind() == TokenKind::Name)
        .then_some(name)
}

/// Index of the newline ending the line that contains `from`, or the
/// sequence length if the line is the last one.
fn line_end(tokens: &[Token], from: usize) -> usize {
    tokens[from..]
        .iter()
        .position(Token::is_newline)
        .map_or(tokens.len(), |offset| from + offset)
}

/// Strips leading and trailing whitespace tokens.
pub(crate) fn trim_whitespace(tokens: &[Token]) -> &[Token] {
    let start = tokens
        .iter()
        .position(|t| !t.is_whitespace())
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| !t.is_whitespace())
        .map_or(start, |i| i + 1);
    &tokens[start..end]
}
