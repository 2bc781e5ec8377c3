//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, token cursor
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   tokens, symbols, status bar)
//! - **[`theme`]**: centralized color palette and per-token styles
//!
//! The entry point for consumers is [`App`]: construct it with an [`Analysis`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Analysis`]: crate::parser::Analysis
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
