//! Token definitions shared by the scanner and the declaration scanner
//!
//! A [`Token`] is a plain record: a [`TokenKind`] tag, the raw lexeme text and
//! the 1-based position of its first character. Tokens have no behavior of
//! their own beyond a few classification helpers.

use std::fmt;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Closed set of token classifications.
///
/// Whitespace is consumed by the scanner for position bookkeeping and never
/// surfaces as a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    PpDirective,
    CommentBlock,
    CommentLine,
    String,
    Char,
    BadChar,
    HexInt,
    OctInt,
    Float,
    Int,
    BadNumId,
    Id,
    Keyword,
    Op,
    InvalidChar,
}

impl TokenKind {
    /// The canonical upper-case name used in listings (`PP_DIRECTIVE`, `ID`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::PpDirective => "PP_DIRECTIVE",
            TokenKind::CommentBlock => "COMMENT_BLOCK",
            TokenKind::CommentLine => "COMMENT_LINE",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::BadChar => "BAD_CHAR",
            TokenKind::HexInt => "HEX_INT",
            TokenKind::OctInt => "OCT_INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Int => "INT",
            TokenKind::BadNumId => "BAD_NUM_ID",
            TokenKind::Id => "ID",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Op => "OP",
            TokenKind::InvalidChar => "INVALID_CHAR",
        }
    }

    /// Kinds that represent a lexical error rather than a valid lexeme.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::BadNumId | TokenKind::BadChar | TokenKind::InvalidChar
        )
    }

    /// Comments and preprocessor lines: present in the stream, irrelevant to declarations.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::CommentBlock | TokenKind::CommentLine | TokenKind::PpDirective
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::CommentBlock | TokenKind::CommentLine)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub col: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// Returns the source location where this token starts.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.col)
    }

    /// True for an `OP` token with exactly this text.
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Id
    }

    /// True for a keyword that starts or continues a declaration's base type.
    pub fn is_type_word(&self) -> bool {
        self.kind == TokenKind::Keyword && is_type_word(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text, self.location())
    }
}

/// Reserved words of the language, case-sensitive.
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
];

/// Base type specifiers that open a declaration.
pub const TYPE_SPECIFIERS: &[&str] = &[
    "int", "float", "double", "char", "void", "long", "short", "unsigned", "signed", "_Bool",
];

/// Qualifiers and storage classes accepted in the same run as the specifiers.
pub const TYPE_QUALIFIERS: &[&str] = &[
    "const", "volatile", "register", "static", "extern", "auto", "inline",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_type_word(word: &str) -> bool {
    TYPE_SPECIFIERS.contains(&word) || TYPE_QUALIFIERS.contains(&word)
}

/// Classify an identifier-shaped lexeme as `KEYWORD` or `ID`.
pub fn word_kind(word: &str) -> TokenKind {
    if is_keyword(word) {
        TokenKind::Keyword
    } else {
        TokenKind::Id
    }
}
