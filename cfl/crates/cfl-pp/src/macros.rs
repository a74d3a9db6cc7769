//! Macro definitions and the macro table.

use cfl_lex::{Token, TokenKind};
use rustc_hash::FxHashMap;

/// One `#define`.
///
/// An object-like macro has no parameter list. A function-like macro has
/// one, possibly empty (`#define F() ...`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDefinition {
    name: Token,
    params: Vec<Token>,
    body: Vec<Token>,
    function_like: bool,
}

impl MacroDefinition {
    /// Creates an object-like macro.
    pub fn object(name: Token, body: Vec<Token>) -> Self {
        Self {
            name,
            params: Vec::new(),
            body,
            function_like: false,
        }
    }

    /// Creates a function-like macro.
    pub fn function(name: Token, params: Vec<Token>, body: Vec<Token>) -> Self {
        Self {
            name,
            params,
            body,
            function_like: true,
        }
    }

    /// The macro name.
    pub fn name(&self) -> &str {
        self.name.text()
    }

    /// The name token from the defining directive.
    pub fn name_token(&self) -> &Token {
        &self.name
    }

    /// Parameter names, in order.
    pub fn params(&self) -> &[Token] {
        &self.params
    }

    /// Replacement tokens.
    pub fn body(&self) -> &[Token] {
        &self.body
    }

    /// Returns true if the macro takes a parameter list.
    pub fn is_function_like(&self) -> bool {
        self.function_like
    }

    /// Position of the parameter named `name`.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.text() == name)
    }

    /// Body with every parameter name replaced by the matching argument.
    pub(crate) fn substitute(&self, args: &[Vec<Token>]) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.body.len());
        for token in &self.body {
            match self.param_index_of(token).and_then(|i| args.get(i)) {
                Some(arg) => out.extend(arg.iter().cloned()),
                None => out.push(token.clone()),
            }
        }
        out
    }

    fn param_index_of(&self, token: &Token) -> Option<usize> {
        if token.kind() == TokenKind::Name {
            self.param_index(token.text())
        } else {
            None
        }
    }
}

/// Name -> definition map. Names are unique; defining an existing name
/// replaces it.
#[derive(Clone, Debug, Default)]
pub struct MacroTable {
    defs: FxHashMap<String, MacroDefinition>,
}

impl MacroTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `def`, returning the definition it replaced.
    pub fn define(&mut self, def: MacroDefinition) -> Option<MacroDefinition> {
        self.defs.insert(def.name().to_string(), def)
    }

    /// Removes `name` if present.
    pub fn undef(&mut self, name: &str) -> Option<MacroDefinition> {
        self.defs.remove(name)
    }

    /// Looks up `name`.
    pub fn lookup(&self, name: &str) -> Option<&MacroDefinition> {
        self.defs.get(name)
    }

    /// Returns true if `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfl_lex::Lexer;

    fn names(src: &str) -> Vec<Token> {
        Lexer::lex(src, "m.c")
            .into_tokens()
            .into_iter()
            .filter(|t| !t.is_whitespace())
            .collect()
    }

    #[test]
    fn test_define_replaces() {
        let mut table = MacroTable::new();
        let first = names("A 1");
        let second = names("A 2");
        assert!(table
            .define(MacroDefinition::object(first[0].clone(), vec![first[1].clone()]))
            .is_none());
        let old = table.define(MacroDefinition::object(second[0].clone(), vec![second[1].clone()]));
        assert_eq!(old.map(|d| d.body()[0].text().to_string()), Some("1".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("A").map(|d| d.body()[0].text()), Some("2"));
    }

    #[test]
    fn test_undef_absent_is_none() {
        let mut table = MacroTable::new();
        assert!(table.undef("NOPE").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_substitute_params() {
        let t = names("M x y x + y");
        let def = MacroDefinition::function(
            t[0].clone(),
            vec![t[1].clone(), t[2].clone()],
            t[3..].to_vec(),
        );
        let args = vec![names("1"), names("f ( 2 )")];
        let out: Vec<String> = def.substitute(&args).iter().map(|t| t.to_string()).collect();
        assert_eq!(out, vec!["1", "+", "f", "(", "2", ")"]);
    }

    #[test]
    fn test_param_index() {
        let t = names("F a b");
        let def = MacroDefinition::function(t[0].clone(), t[1..].to_vec(), Vec::new());
        assert!(def.is_function_like());
        assert_eq!(def.param_index("b"), Some(1));
        assert_eq!(def.param_index("c"), None);
    }
}
