//! Main TUI application state and logic

use crate::parser::token::TokenKind;
use crate::parser::Analysis;
use crate::ui::panes::{self, SourceScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const PLAY_INTERVAL: Duration = Duration::from_millis(250);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> symbols)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Symbols,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Symbols => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Tokens and symbol table being explored
    pub analysis: Analysis,

    /// The source code that was scanned
    pub source_code: String,

    /// Index of the current token
    pub cursor: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub token_scroll: usize,
    pub symbol_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over an analysis and the source it came from
    pub fn new(analysis: Analysis, source_code: String) -> Self {
        let status_message = match analysis.errors().count() {
            0 => String::from("Ready!"),
            n => format!("Ready! {} lexical error(s), press 'e' to visit", n),
        };
        App {
            analysis,
            source_code,
            cursor: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            token_scroll: 0,
            symbol_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.step_forward(1) == 0 {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                } else {
                    self.status_message = "Playing...".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn total_tokens(&self) -> usize {
        self.analysis.tokens.len()
    }

    fn current_index(&self) -> Option<usize> {
        (self.cursor < self.total_tokens()).then_some(self.cursor)
    }

    /// Name to highlight in the symbol pane: the current token, if it is an identifier.
    fn selected_symbol(&self) -> Option<&str> {
        self.analysis
            .tokens
            .get(self.cursor)
            .filter(|t| t.kind == TokenKind::Id)
            .map(|t| t.text.as_str())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Right column: Tokens (top) | Symbols (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let current = self.current_index();
        let selected = self.selected_symbol().map(str::to_string);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            &self.analysis.tokens,
            current,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_token_pane(
            frame,
            right_rows[0],
            &self.analysis.tokens,
            current,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        panes::render_symbol_pane(
            frame,
            right_rows[1],
            &self.analysis.symbols,
            selected.as_deref(),
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbol_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_token: self.cursor,
                total_tokens: self.total_tokens(),
                error_count: self.analysis.errors().count(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N tokens directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                let stepped = self.step_forward(n);
                self.status_message = format!("Stepped forward {} token(s)", stepped);
            }
            KeyCode::Char('e') => {
                self.is_playing = false;
                self.jump_to_next_error();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if self.step_backward(1) == 0 {
                    self.status_message = "Already at the first token".to_string();
                } else {
                    self.status_message = "Stepped backward".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step_forward(1) == 0 {
                    self.status_message = "Already at the last token".to_string();
                } else {
                    self.status_message = "Stepped forward".to_string();
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.step_backward(1);
                }
                FocusedPane::Symbols => {
                    self.symbol_scroll = self.symbol_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.step_forward(1);
                }
                FocusedPane::Symbols => {
                    self.symbol_scroll = self.symbol_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.cursor = self.total_tokens().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.cursor = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Move forward up to `n` tokens, returning how many steps were taken
    pub fn step_forward(&mut self, n: usize) -> usize {
        let last = self.total_tokens().saturating_sub(1);
        let target = (self.cursor + n).min(last);
        let stepped = target.saturating_sub(self.cursor);
        self.cursor = target.max(self.cursor);
        stepped
    }

    /// Move backward up to `n` tokens, returning how many steps were taken
    pub fn step_backward(&mut self, n: usize) -> usize {
        let stepped = n.min(self.cursor);
        self.cursor -= stepped;
        stepped
    }

    /// Move to the next error-kind token after the cursor, wrapping around
    pub fn jump_to_next_error(&mut self) {
        let tokens = &self.analysis.tokens;
        let found = (self.cursor + 1..tokens.len())
            .chain(0..=self.cursor.min(tokens.len().saturating_sub(1)))
            .find(|&idx| tokens.get(idx).is_some_and(|t| t.kind.is_error()));

        match found {
            Some(idx) => {
                self.cursor = idx;
                let token = &self.analysis.tokens[idx];
                self.status_message = format!("{} at {}", token.kind, token.location());
            }
            None => {
                self.status_message = "No lexical errors".to_string();
            }
        }
    }
}
