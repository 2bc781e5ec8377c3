//! Symbol table pane
//!
//! Shows the final table in index order. When the current token is an
//! identifier with an entry, that row is highlighted and scrolled into view.

use crate::symbols::{DeclKind, SymbolTable};
use crate::ui::panes::tokens::follow_cursor;
use crate::ui::theme::{border_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn kind_style(kind: Option<DeclKind>) -> Style {
    let color = match kind {
        Some(DeclKind::Function) => DEFAULT_THEME.function,
        Some(DeclKind::Parameter) => DEFAULT_THEME.secondary,
        Some(DeclKind::Variable) => DEFAULT_THEME.type_name,
        Some(DeclKind::Call) => DEFAULT_THEME.primary,
        None => DEFAULT_THEME.comment,
    };
    Style::default().fg(color)
}

/// Render the symbol table pane
pub fn render_symbol_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &SymbolTable,
    selected: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Symbols ({}) ", symbols.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if symbols.is_empty() {
        let paragraph = Paragraph::new("(no symbols)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let selected_row = selected
        .and_then(|name| symbols.get(name))
        .map(|sym| sym.index as usize - 1);

    if let Some(row) = selected_row {
        follow_cursor(scroll_offset, row, visible_height);
    } else if symbols.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(symbols.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = symbols
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|sym| {
            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>3} ", sym.index),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<5} ", sym.kind.map_or("-", DeclKind::as_str)),
                    kind_style(sym.kind),
                ),
                Span::styled(
                    format!("{:<16} ", sym.name),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    format!("{:<18} ", sym.declared_type.as_deref().unwrap_or("")),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::styled(
                    format!(
                        "@{} L{} ×{} refs {}",
                        sym.scope.as_deref().unwrap_or("?"),
                        sym.first_decl_line.map_or_else(|| "?".to_string(), |l| l.to_string()),
                        sym.occurrences,
                        sym.references
                    ),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]);
            if selected_row == Some(sym.index as usize - 1) {
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
