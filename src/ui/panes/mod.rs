//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: source text colored by the scanner's own tokens, current token underlined
//! - [`tokens`]: the token stream, one row per token
//! - [`symbols`]: the symbol table in index order
//! - [`status`]: status bar with keybindings and position
//!
//! Each pane module exports a stateless `render_*` function; scroll offsets
//! live in [`App`](crate::ui::App) and are passed in by reference.

pub mod source;
pub mod status;
pub mod symbols;
pub mod tokens;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use symbols::render_symbol_pane;
pub use tokens::render_token_pane;
