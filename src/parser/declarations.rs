//! Declaration recognition
//!
//! This module handles declaration statements that start with a type word:
//!
//! - Variables: `int x, *p = &x, a[4];`
//! - Function declarations and definitions: `char *name(int n, ...) { ... }`
//! - Parameter lists, including unnamed and variadic parameters
//! - Initializer skipping, aware of nested `()`, `[]` and `{}`
//!
//! # Grammar
//!
//! ```text
//! declaration ::= type_word+ declarator ("," declarator)* (";" | "{")
//! declarator  ::= "*"* identifier ( "(" params ")" | array_dim* ) ("=" initializer)?
//! params      ::= param ("," param)*
//! param       ::= type_word* "*"* identifier? array_dim* | "..."
//! ```
//!
//! Nothing here can fail. A declarator the grammar does not cover is skipped
//! with a single-token advance that ends the statement.

use crate::parser::parse::DeclarationScanner;
use crate::parser::scope::GLOBAL_SCOPE;
use crate::parser::token::TokenKind;
use crate::symbols::{DeclKind, SymbolAttrs};

/// A parameter collected from a function declarator
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Param {
    name: String,
    declared_type: Option<String>,
    line: u32,
}

impl<'t> DeclarationScanner<'t> {
    /// Parse one declaration statement; the cursor is on its first type word.
    pub(crate) fn parse_declaration(&mut self) {
        let base_type = self.parse_type_words();

        loop {
            let pointer_depth = self.parse_pointers();

            if let Some(name_tok) = self.peek_token().filter(|t| t.is_ident()).cloned() {
                if self.peek_is_op(1, "(") {
                    self.advance(); // name
                    self.advance(); // '('
                    if self.parse_function(&name_tok.text, name_tok.line, &base_type) {
                        return;
                    }
                } else {
                    self.advance();
                    let mut declared_type = variable_type(&base_type, pointer_depth);
                    let dims = self.parse_array_suffixes();
                    if !dims.is_empty() {
                        declared_type = format!("{} {}", declared_type, dims);
                    }
                    let scope = self.current_scope().to_string();
                    self.register(
                        &name_tok.text,
                        SymbolAttrs::new()
                            .kind(DeclKind::Variable)
                            .declared_type(declared_type)
                            .scope(scope)
                            .line(name_tok.line),
                    );
                }
            }

            if self.match_op("=") {
                self.skip_initializer();
            }
            if self.match_op(",") {
                continue;
            }
            if self.match_op(";") || self.check_op("{") {
                break;
            }
            // Unexpected token: consume it so the main loop always progresses
            self.advance();
            break;
        }
    }

    /// Register a function whose `(` was just consumed. Returns `true` when a
    /// body followed and its scope was entered.
    fn parse_function(&mut self, name: &str, line: u32, return_type: &str) -> bool {
        let params = self.parse_parameter_list();

        // Functions always live at global scope, even when nested in a block
        self.register(
            name,
            SymbolAttrs::new()
                .kind(DeclKind::Function)
                .declared_type(return_type)
                .scope(GLOBAL_SCOPE)
                .line(line),
        );

        if !self.match_op("{") {
            return false;
        }

        let scope = self.scopes.push(Some(name)).to_string();
        for param in params {
            let mut attrs = SymbolAttrs::new()
                .kind(DeclKind::Parameter)
                .scope(scope.as_str())
                .line(param.line);
            attrs.declared_type = param.declared_type;
            self.register(&param.name, attrs);
        }
        true
    }

    /// Collect parameters up to and including the matching `)`.
    fn parse_parameter_list(&mut self) -> Vec<Param> {
        let mut params = Vec::new();

        while let Some(tok) = self.peek_token() {
            if tok.is_op(")") {
                self.advance();
                break;
            }
            if tok.is_op(",") {
                self.advance();
                continue;
            }
            if let Some(param) = self.parse_parameter() {
                params.push(param);
            }
        }

        params
    }

    /// One parameter, stopping before the `,` or `)` that ends it at depth 0.
    ///
    /// The name is the last identifier outside any nesting, or failing that
    /// the first identifier inside parentheses (`int (*cb)(int x)` names `cb`).
    /// Words seen before the first `*` form the type text, so a typedef name
    /// or struct tag that turns out not to be the parameter name is kept
    /// (`FILE *out` has type `FILE *`).
    fn parse_parameter(&mut self) -> Option<Param> {
        let mut depth = 0usize;
        let mut words: Vec<String> = Vec::new();
        let mut pointers = 0usize;
        // (name, line, pointers seen before it)
        let mut name: Option<(String, u32, usize)> = None;
        let mut nested: Option<(String, u32)> = None;
        let mut dims = String::new();

        while let Some(tok) = self.peek_token() {
            if depth == 0 && tok.is_op("[") {
                let suffix = self.parse_array_suffixes();
                dims.push_str(&suffix);
                continue;
            }
            match tok.kind {
                TokenKind::Op => match tok.text.as_str() {
                    "," | ")" if depth == 0 => break,
                    "*" if depth == 0 => pointers += 1,
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    _ => {}
                },
                TokenKind::Id if depth == 0 => {
                    let previous = name.replace((tok.text.clone(), tok.line, pointers));
                    if let Some((word, _, 0)) = previous {
                        words.push(word);
                    }
                    dims.clear();
                }
                TokenKind::Keyword if depth == 0 && pointers == 0 => {
                    words.push(tok.text.clone());
                }
                TokenKind::Id if nested.is_none() => {
                    nested = Some((tok.text.clone(), tok.line));
                }
                _ => {}
            }
            self.advance();
        }

        let (name, line) = match name {
            Some((name, line, _)) => (name, line),
            None => nested?,
        };

        let mut declared_type = format!("{} {}", words.join(" "), "*".repeat(pointers))
            .trim()
            .to_string();
        if !dims.is_empty() {
            declared_type = format!("{} {}", declared_type, dims).trim().to_string();
        }

        Some(Param {
            name,
            declared_type: (!declared_type.is_empty()).then_some(declared_type),
            line,
        })
    }

    /// Skip an initializer after `=`, stopping before the `,` or `;` that
    /// ends it at nesting depth zero.
    pub(crate) fn skip_initializer(&mut self) {
        let mut depth = 0usize;
        while let Some(tok) = self.peek_token() {
            if tok.kind == TokenKind::Op {
                match tok.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    "," | ";" if depth == 0 => return,
                    _ => {}
                }
            }
            self.advance();
        }
    }

    /// Maximal run of type specifiers and qualifiers, space-joined.
    fn parse_type_words(&mut self) -> String {
        let mut words: Vec<String> = Vec::new();
        while let Some(tok) = self.peek_token().filter(|t| t.is_type_word()) {
            words.push(tok.text.clone());
            self.advance();
        }
        words.join(" ")
    }

    fn parse_pointers(&mut self) -> usize {
        let mut depth = 0;
        while self.match_op("*") {
            depth += 1;
        }
        depth
    }

    /// Consume `[...]` groups, returning their text (`[10][N+1]`).
    fn parse_array_suffixes(&mut self) -> String {
        let mut dims = String::new();
        while self.check_op("[") {
            let mut depth = 0usize;
            while let Some(tok) = self.advance() {
                dims.push_str(&tok.text);
                if tok.is_op("[") {
                    depth += 1;
                } else if tok.is_op("]") {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
            }
        }
        dims
    }
}

/// Base type followed by one ` *` per pointer level: `int * *`.
fn variable_type(base: &str, pointer_depth: usize) -> String {
    let mut ty = base.to_string();
    for _ in 0..pointer_depth {
        ty.push_str(" *");
    }
    ty.trim().to_string()
}
