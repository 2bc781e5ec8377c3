//! Token stream pane

use crate::listing::escape_text;
use crate::parser::token::Token;
use crate::ui::theme::{border_style, token_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Keep `cursor` inside the visible window, moving `offset` as little as possible.
pub fn follow_cursor(offset: &mut usize, cursor: usize, visible_height: usize) {
    if cursor < *offset {
        *offset = cursor;
    } else if cursor >= *offset + visible_height {
        *offset = cursor + 1 - visible_height;
    }
}

/// Render the token list with the current token highlighted
pub fn render_token_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    current: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if let Some(cursor) = current {
        follow_cursor(scroll_offset, cursor, visible_height);
    }

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", token.line, token.col),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<13} ", token.kind.as_str()), token_style(token)),
                Span::styled(escape_text(&token.text), Style::default().fg(DEFAULT_THEME.fg)),
            ]);
            if current == Some(idx) {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_cursor() {
        let mut offset = 0;
        follow_cursor(&mut offset, 3, 10);
        assert_eq!(offset, 0);
        follow_cursor(&mut offset, 12, 10);
        assert_eq!(offset, 3);
        follow_cursor(&mut offset, 1, 10);
        assert_eq!(offset, 1);
    }
}
