//! Plain-text listing of tokens and symbols
//!
//! One line per token (`line:col<TAB>KIND<TAB>text`) followed by a summary of
//! the symbol table. Newlines and tabs inside lexemes are shown escaped so
//! every token stays on one line.

use crate::parser::token::Token;
use crate::symbols::{Symbol, SymbolTable};
use std::io::{self, Write};

/// What to include in a listing
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub show_comments: bool,
    pub show_symbols: bool,
}

/// Escape newlines and tabs so a lexeme renders on a single line.
pub fn escape_text(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t")
}

pub fn format_token(token: &Token) -> String {
    format!(
        "{}:{}\t{}\t{}",
        token.line,
        token.col,
        token.kind,
        escape_text(&token.text)
    )
}

pub fn format_symbol(symbol: &Symbol) -> String {
    let first_line = symbol
        .first_decl_line
        .map_or_else(|| "-".to_string(), |line| line.to_string());
    format!(
        "{:3} {:20} occ={:3} refs={:3} first_line={:<5} {:<5} {:<24} {}",
        symbol.index,
        symbol.name,
        symbol.occurrences,
        symbol.references,
        first_line,
        symbol.kind.map_or("-", |k| k.as_str()),
        symbol.declared_type.as_deref().unwrap_or("-"),
        symbol.scope.as_deref().unwrap_or("-"),
    )
}

/// Write the token lines, then the symbol summary.
pub fn write_listing<W: Write>(
    out: &mut W,
    tokens: &[Token],
    symbols: &SymbolTable,
    options: ListingOptions,
) -> io::Result<()> {
    for token in tokens {
        if !options.show_comments && token.kind.is_comment() {
            continue;
        }
        writeln!(out, "{}", format_token(token))?;
    }

    if options.show_symbols {
        write_symbols(out, symbols)?;
    }
    Ok(())
}

pub fn write_symbols<W: Write>(out: &mut W, symbols: &SymbolTable) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Symbol table ({} entries):", symbols.len())?;
    for symbol in symbols {
        writeln!(out, "{}", format_symbol(symbol))?;
    }
    Ok(())
}
