//! Source code pane rendering with token-based highlighting
//!
//! Colors come from the scanner's own tokens rather than a separate
//! highlighter, so what is shown is exactly how the text was classified:
//! error tokens get a red background and the current token is bold on the
//! current-line background.
//!
//! # Rendering
//!
//! Every token is painted onto a per-character style grid using its
//! line/column and text (tokens may span lines). Visible lines are then cut
//! into spans of equal style.

use crate::parser::token::Token;
use crate::ui::theme::{border_style, token_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is kept on while stepping
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-character styles for every line of the source.
fn style_grid(lines: &[Vec<char>], tokens: &[Token], current: Option<usize>) -> Vec<Vec<Style>> {
    let mut grid: Vec<Vec<Style>> = lines
        .iter()
        .map(|line| vec![Style::default(); line.len()])
        .collect();

    for (idx, token) in tokens.iter().enumerate() {
        let mut style = token_style(token);
        if current == Some(idx) {
            style = style
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        let mut row = token.line.saturating_sub(1) as usize;
        let mut col = token.col.saturating_sub(1) as usize;
        for ch in token.text.chars() {
            if ch == '\n' {
                row += 1;
                col = 0;
                continue;
            }
            if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = style;
            }
            col += 1;
        }
    }

    grid
}

fn styled_line(chars: &[char], styles: &[Style]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for (ch, style) in chars.iter().zip(styles) {
        if *style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = *style;
        // Tabs and carriage returns would break column alignment
        run.push(match ch {
            '\t' => ' ',
            '\r' => ' ',
            c => *c,
        });
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    spans
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    current: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<Vec<char>> = source_code.split('\n').map(|l| l.chars().collect()).collect();
    let total_lines = lines.len();
    let current_line = current
        .and_then(|idx| tokens.get(idx))
        .map_or(0, |t| t.line as usize);

    // Calculate visible range
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Initialize target_line_row to center if not set
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let grid = style_grid(&lines, tokens, current);

    let visible_lines: Vec<Line> = lines
        .iter()
        .zip(&grid)
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, (chars, styles))| {
            let line_num = idx + 1;
            let num_style = if line_num == current_line {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(styled_line(chars, styles));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
