//! # Introduction
//!
//! cscan tokenizes C source text into a classified token stream, recovers
//! from malformed lexemes instead of aborting, and builds a symbol table by
//! scanning declarations with scope awareness.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → DeclarationScanner → SymbolTable → Listing / TUI
//! ```
//!
//! 1. [`parser`]: the recovering [`Scanner`](parser::Scanner) and the
//!    scope-aware [`DeclarationScanner`](parser::DeclarationScanner);
//!    [`parser::analyze`] runs both over one source text.
//! 2. [`symbols`]: the [`SymbolTable`](symbols::SymbolTable), with stable
//!    first-seen indices and first-writer-wins merging.
//! 3. [`errors`]: typed diagnostics for error-kind tokens and driver errors.
//! 4. [`listing`]: plain-text token listing and symbol summary.
//! 5. [`ui`]: ratatui-based token/symbol explorer; not part of the stable
//!    library API.
//!
//! ## Recovery
//!
//! Nothing in the pipeline fails on bad input. Malformed lexemes become
//! `BAD_NUM_ID`, `BAD_CHAR` or `INVALID_CHAR` tokens inline in the stream,
//! and the declaration scanner skips whatever it cannot interpret.
//!
//! ```
//! use cscan::parser::{analyze, TokenKind};
//!
//! let analysis = analyze("int *p, 9lives;");
//! assert!(analysis.tokens.iter().any(|t| t.kind == TokenKind::BadNumId));
//! assert_eq!(
//!     analysis.symbols.get("p").and_then(|s| s.declared_type.as_deref()),
//!     Some("int *")
//! );
//! ```

pub mod errors;
pub mod listing;
pub mod parser;
pub mod symbols;
pub mod ui;
