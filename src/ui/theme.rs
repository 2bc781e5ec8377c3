use crate::parser::token::{Token, TokenKind};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub type_name: Color,  // Cyan for type words
    pub directive: Color,  // Pink for preprocessor lines
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    function: Color::Rgb(249, 226, 175),       // Yellow for functions
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type names
    directive: Color::Rgb(245, 194, 231),
};

/// Foreground style for a token, used by every pane that shows lexemes.
pub fn token_style(token: &Token) -> Style {
    let theme = &DEFAULT_THEME;
    match token.kind {
        TokenKind::Keyword if token.is_type_word() => Style::default().fg(theme.type_name),
        TokenKind::Keyword => Style::default()
            .fg(theme.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Id => Style::default().fg(theme.fg),
        TokenKind::Int | TokenKind::HexInt | TokenKind::OctInt | TokenKind::Float => {
            Style::default().fg(theme.number)
        }
        TokenKind::String | TokenKind::Char => Style::default().fg(theme.string),
        TokenKind::CommentBlock | TokenKind::CommentLine => Style::default().fg(theme.comment),
        TokenKind::PpDirective => Style::default().fg(theme.directive),
        TokenKind::Op => Style::default().fg(theme.primary),
        TokenKind::BadNumId | TokenKind::BadChar | TokenKind::InvalidChar => Style::default()
            .fg(Color::Black)
            .bg(theme.error)
            .add_modifier(Modifier::BOLD),
    }
}

/// Border style shared by all bordered panes.
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
