//! Error types
//!
//! [`Diagnostic`] is a typed view of the error-kind tokens the scanner places
//! in the stream. The scanner never returns it; drivers build one from a token
//! when they decide to report it.
//!
//! [`CliError`] covers failures of the command-line driver itself.

use crate::parser::token::{SourceLocation, Token, TokenKind};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A lexical error found in the token stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Digits fused to a following identifier, e.g. `123abc`
    #[error("{location}: malformed numeric identifier '{text}'")]
    MalformedNumericIdentifier { text: String, location: SourceLocation },

    /// Character literal that is empty or holds more than one character
    #[error("{location}: invalid character literal {text}")]
    InvalidCharLiteral { text: String, location: SourceLocation },

    /// Character matched by no lexical rule
    #[error("{location}: unrecognized character '{}'", .text.escape_debug())]
    UnrecognizedCharacter { text: String, location: SourceLocation },
}

impl Diagnostic {
    /// Diagnostic for an error-kind token; `None` for every other kind.
    pub fn from_token(token: &Token) -> Option<Self> {
        let text = token.text.clone();
        let location = token.location();
        match token.kind {
            TokenKind::BadNumId => Some(Diagnostic::MalformedNumericIdentifier { text, location }),
            TokenKind::BadChar => Some(Diagnostic::InvalidCharLiteral { text, location }),
            TokenKind::InvalidChar => Some(Diagnostic::UnrecognizedCharacter { text, location }),
            _ => None,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::MalformedNumericIdentifier { location, .. }
            | Diagnostic::InvalidCharLiteral { location, .. }
            | Diagnostic::UnrecognizedCharacter { location, .. } => *location,
        }
    }
}

/// Failures of the command-line driver
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the listing or driving the terminal failed
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("{count} lexical error(s) found")]
    LexicalErrors { count: usize },
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } => 2,
            CliError::Io(_) | CliError::LexicalErrors { .. } => 1,
        }
    }
}
