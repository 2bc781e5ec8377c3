//! C source scanning
//!
//! This module turns C source text into a classified token stream and a
//! symbol table:
//! - [`token`]: token record, kinds and keyword tables
//! - [`lexer`]: recovering tokenizer (source text → tokens)
//! - [`parse`] / [`declarations`]: scope-aware declaration scanner
//!   (tokens → [`SymbolTable`] mutations)
//! - [`scope`]: the scope stack used while scanning
//!
//! # Error recovery
//!
//! Neither stage fails. Lexical errors are ordinary tokens of kind
//! `BAD_NUM_ID`, `BAD_CHAR` or `INVALID_CHAR` placed inline in the stream;
//! [`analyze`] strips them (along with comments and preprocessor lines)
//! before the declaration pass and leaves reporting to the caller.

pub mod declarations;
pub mod lexer;
pub mod parse;
pub mod scope;
pub mod token;

pub use lexer::{tokenize, Scanner};
pub use parse::DeclarationScanner;
pub use token::{SourceLocation, Token, TokenKind};

use crate::symbols::SymbolTable;

/// Result of scanning one source text.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every token, error kinds included, in source order.
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
}

impl Analysis {
    /// Error-kind tokens in source order.
    pub fn errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Tokens the declaration scanner should see: no error kinds, no trivia.
pub fn declaration_stream(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| !t.kind.is_error() && !t.kind.is_trivia())
        .cloned()
        .collect()
}

/// Tokenize `source`, run the declaration pass over it, then count every
/// identifier use against the symbols it found.
///
/// Each call owns its own scanner, declaration scanner and table, so separate
/// inputs never share state.
pub fn analyze(source: &str) -> Analysis {
    let tokens = tokenize(source);
    let mut symbols = SymbolTable::new();
    DeclarationScanner::new(declaration_stream(&tokens), &mut symbols).run();
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Id) {
        symbols.note_reference(&token.text);
    }
    Analysis { tokens, symbols }
}
