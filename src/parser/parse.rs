//! Declaration scanner coordinator
//!
//! This module provides the [`DeclarationScanner`] struct: token cursor
//! helpers, the scope stack, and the main pass that dispatches on each token.
//!
//! # Architecture
//!
//! - This module: cursor, scope handling, call-site detection, main loop
//! - `declarations`: declaration statements, declarators, parameter lists and
//!   initializer skipping
//!
//! Methods are split across files using `impl DeclarationScanner` blocks, the
//! same way a recursive descent parser would be, but nothing here builds a
//! tree: the only output is the mutations applied to the [`SymbolTable`].
//! Tokens the scanner cannot interpret are skipped one at a time, so the pass
//! always terminates with the cursor at end of stream.

use crate::parser::scope::ScopeStack;
use crate::parser::token::Token;
use crate::symbols::{DeclKind, SymbolAttrs, SymbolTable};
use tracing::{info_span, trace};

/// Single-pass, scope-aware declaration recognizer.
pub struct DeclarationScanner<'t> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) scopes: ScopeStack,
    pub(crate) table: &'t mut SymbolTable,
}

impl<'t> DeclarationScanner<'t> {
    /// `tokens` should already be free of error-kind tokens; comments and
    /// preprocessor lines are tolerated but will break up declarations they
    /// sit inside of.
    pub fn new(tokens: Vec<Token>, table: &'t mut SymbolTable) -> Self {
        Self {
            tokens,
            position: 0,
            scopes: ScopeStack::new(),
            table,
        }
    }

    /// Walk the whole stream once, registering declarations and call sites.
    pub fn run(&mut self) {
        let _span = info_span!("declaration_scan", tokens = self.tokens.len()).entered();

        while let Some(tok) = self.peek_token() {
            if tok.is_op("{") {
                self.scopes.push(None);
                self.advance();
            } else if tok.is_op("}") {
                self.scopes.pop();
                self.advance();
            } else if tok.is_type_word() {
                self.parse_declaration();
            } else if tok.is_ident() && self.peek_is_op(1, "(") {
                let (name, line) = (tok.text.clone(), tok.line);
                let scope = self.current_scope().to_string();
                self.register(&name, SymbolAttrs::new().kind(DeclKind::Call).scope(scope).line(line));
                self.advance();
            } else {
                self.advance();
            }
        }

        trace!(symbols = self.table.len(), "declaration scan complete");
    }

    /// True once every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn current_scope(&self) -> &str {
        self.scopes.current()
    }

    pub(crate) fn register(&mut self, name: &str, attrs: SymbolAttrs) {
        let sym = self.table.add(name, attrs);
        trace!(
            name,
            index = sym.index,
            occurrences = sym.occurrences,
            kind = sym.kind.map(DeclKind::as_str),
            "register symbol"
        );
    }

    /// Current token without consuming
    pub(crate) fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Token `n` positions ahead of the cursor
    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn peek_is_op(&self, n: usize, op: &str) -> bool {
        self.peek_ahead(n).is_some_and(|t| t.is_op(op))
    }

    pub(crate) fn check_op(&self, op: &str) -> bool {
        self.peek_is_op(0, op)
    }

    /// Consume the current token if it is the operator `op`.
    pub(crate) fn match_op(&mut self, op: &str) -> bool {
        if self.check_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance to next token
    pub(crate) fn advance(&mut self) -> Option<&Token> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;
        self.tokens.get(self.position - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn scan(source: &str) -> SymbolTable {
        let mut table = SymbolTable::new();
        let mut scanner = DeclarationScanner::new(tokenize(source), &mut table);
        scanner.run();
        assert!(scanner.is_at_end());
        table
    }

    #[test]
    fn test_call_sites_use_current_scope() {
        let table = scan("int main() { puts(\"hi\"); { helper(1); } }");
        let puts = table.get("puts").expect("puts registered");
        assert_eq!(puts.kind, Some(DeclKind::Call));
        assert_eq!(puts.scope.as_deref(), Some("main"));
        let helper = table.get("helper").expect("helper registered");
        assert_eq!(helper.scope.as_deref(), Some("scope2"));
    }

    #[test]
    fn test_keywords_are_not_calls() {
        let table = scan("while (x) { if (y) return sizeof(z); }");
        assert!(table.get("while").is_none());
        assert!(table.get("sizeof").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_stray_closing_brace_keeps_global() {
        let mut table = SymbolTable::new();
        let mut scanner = DeclarationScanner::new(tokenize("} } int x;"), &mut table);
        scanner.run();
        assert_eq!(scanner.current_scope(), "global");
        assert_eq!(
            table.get("x").and_then(|s| s.scope.as_deref()),
            Some("global")
        );
    }

    #[test]
    fn test_unbalanced_input_terminates() {
        let table = scan("int f(int a, { ( [ = ,");
        assert!(table.get("f").is_some());
    }
}
