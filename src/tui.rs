//! TUI (Terminal User Interface) front end
//!
//! Draws the board as a grid of colored letter cells using Ratatui, one row
//! per allowed guess, with a text entry row for the guess being typed.
//!
//! # State Machine
//! - `EnteringGuess` → (game ends) → `GameOver` → (ENTER / N) → `EnteringGuess`

use crate::error::GuessError;
use crate::feedback::{Feedback, FeedbackPattern};
use crate::game_state::{
    CORRECT_GUESS_MESSAGE, GameInterface, GameMode, GameStatus, GuessOutcome, UserAction,
    WelcomeInfo,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Correct => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Absent => (Color::Gray, Color::White),
        }
    }
}

impl From<Feedback> for LetterState {
    fn from(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Correct => Self::Correct,
            Feedback::Present => Self::Present,
            Feedback::Absent => Self::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GuessRow {
    letters: Vec<char>,
    states: Vec<LetterState>,
}

impl GuessRow {
    fn empty(word_length: usize) -> Self {
        Self {
            letters: vec![' '; word_length],
            states: vec![LetterState::Empty; word_length],
        }
    }

    /// Row for text still being typed; unfilled cells stay blank.
    fn typing(input: &str, word_length: usize) -> Self {
        let mut row = Self::empty(word_length);
        for (i, ch) in input.chars().enumerate().take(word_length) {
            row.letters[i] = ch.to_ascii_uppercase();
            row.states[i] = LetterState::Entered;
        }
        row
    }

    fn scored(guess: &str, pattern: &FeedbackPattern) -> Self {
        Self {
            letters: guess.chars().map(|c| c.to_ascii_uppercase()).collect(),
            states: pattern.as_slice().iter().copied().map(LetterState::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    /// Game has ended - message stored in interface.message
    GameOver,
}

fn instructions(state: TuiState) -> &'static str {
    match state {
        TuiState::EnteringGuess => "Type your guess | ENTER: Submit | CTRL-N: New game | ESC: Quit",
        TuiState::GameOver => "ENTER / N: New Game | ESC / Q: Quit",
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    current_input: &'a str,
    word_length: usize,
    max_guesses: usize,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Terminal board implementing [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    current_input: String,
    word_length: usize,
    max_guesses: usize,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            current_input: String::new(),
            word_length: 0,
            max_guesses: 0,
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            current_input: &self.current_input,
            word_length: self.word_length,
            max_guesses: self.max_guesses,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        // title, messages, status and instructions keep their room
        let board_room = f.area().height.saturating_sub(3 + 4 + 3 + 3);
        let board_height = u16::try_from(ctx.max_guesses)
            .unwrap_or(u16::MAX)
            .saturating_mul(ROW_SPACING)
            .saturating_add(2)
            .min(board_room);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Game board
                Constraint::Min(4),               // Messages
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_messages(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // rows past the bottom of the area are never drawn
        let visible_rows = ctx.max_guesses.min(usize::from(inner.height.div_ceil(ROW_SPACING)));
        for row_index in 0..visible_rows {
            let row = match ctx.rows.get(row_index) {
                Some(row) => row.clone(),
                None if row_index == ctx.rows.len() && ctx.state == TuiState::EnteringGuess => {
                    GuessRow::typing(ctx.current_input, ctx.word_length)
                }
                None => GuessRow::empty(ctx.word_length),
            };
            Self::render_guess_row(f, &row, row_index, inner);
        }
    }

    fn render_guess_row(f: &mut Frame, row: &GuessRow, row_index: usize, area: Rect) {
        let offset = u16::try_from(row_index)
            .unwrap_or(u16::MAX)
            .saturating_mul(ROW_SPACING);
        if offset >= area.height {
            return;
        }
        let y = area.y + offset;

        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in row.letters.iter().zip(&row.states) {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            let style = if message.starts_with(CORRECT_GUESS_MESSAGE) {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(message, style)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let paragraph = Paragraph::new(instructions(state))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Next key press, or `None` when nothing arrived within the poll window.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only Press events, Release and Repeat would double the input
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        debug_log!(
            "handle_guess_input() - key: {:?}, current_input: '{}'",
            key.code,
            self.current_input
        );

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
            info_log!("handle_guess_input() - CTRL-N pressed, returning NewGame");
            return Some(UserAction::NewGame);
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && !has_modifier_keys(&key) => {
                if self.current_input.len() < self.word_length {
                    self.error_message.clear();
                    self.current_input.push(c.to_ascii_lowercase());
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.is_empty() => {
                self.error_message = "Type a word first!".to_string();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char(c) if !has_modifier_keys(&key) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {}
        }
        None
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, info: &WelcomeInfo) {
        self.word_length = info.word_length;
        self.max_guesses = info.max_guesses as usize;
        self.rows.clear();
        self.current_input.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringGuess;
        self.message = match info.mode {
            GameMode::Classic => "The computer has picked its word.".to_string(),
            GameMode::Adversarial => "The computer has picked its word... or has it?".to_string(),
        };
        self.status = format!(
            "The word has {} letters - {} guesses left",
            info.word_length, info.max_guesses
        );
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                return Some(UserAction::Exit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - Input error: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_response(
        &mut self,
        guess: &str,
        response: &Result<GuessOutcome, GuessError>,
        guesses_remaining: u32,
    ) {
        match response {
            Ok(GuessOutcome::Feedback(pattern)) => {
                self.rows.push(GuessRow::scored(guess, pattern));
                self.error_message.clear();
                self.message.clear();
            }
            Ok(GuessOutcome::Correct) => {
                let pattern = FeedbackPattern::all_correct(guess.len());
                self.rows.push(GuessRow::scored(guess, &pattern));
                self.error_message.clear();
                self.message = CORRECT_GUESS_MESSAGE.to_string();
            }
            Err(e) => {
                self.error_message = e.to_string();
            }
        }
        self.status = format!("{guesses_remaining} guesses left");
        self.draw_or_log();
    }

    fn display_game_over(&mut self, status: GameStatus, word: &str) {
        self.state = TuiState::GameOver;
        let word = word.to_uppercase();
        self.message = match status {
            GameStatus::Won => format!("{CORRECT_GUESS_MESSAGE} The word was: {word}"),
            GameStatus::Lost | GameStatus::InProgress => format!("Game Over! The word was: {word}"),
        };
        self.status = "Game over".to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> bool {
        loop {
            if self.draw().is_err() {
                return false;
            }
            match Self::next_key() {
                Ok(Some(key)) => match key.code {
                    KeyCode::Enter | KeyCode::Char('n' | 'N') => return true,
                    KeyCode::Esc | KeyCode::Char('q' | 'Q') => return false,
                    _ => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_play_again() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    #[test]
    fn test_letter_state_from_feedback() {
        assert_eq!(LetterState::from(Feedback::Correct), LetterState::Correct);
        assert_eq!(LetterState::from(Feedback::Present), LetterState::Present);
        assert_eq!(LetterState::from(Feedback::Absent), LetterState::Absent);
    }

    #[test]
    fn test_scored_row() {
        let pattern = FeedbackPattern::parse("GYNNG").unwrap();
        let row = GuessRow::scored("crane", &pattern);
        assert_eq!(row.letters, vec!['C', 'R', 'A', 'N', 'E']);
        assert_eq!(
            row.states,
            vec![
                LetterState::Correct,
                LetterState::Present,
                LetterState::Absent,
                LetterState::Absent,
                LetterState::Correct,
            ]
        );
    }

    #[test]
    fn test_typing_row_pads_to_word_length() {
        let row = GuessRow::typing("cr", 4);
        assert_eq!(row.letters, vec!['C', 'R', ' ', ' ']);
        assert_eq!(row.states[1], LetterState::Entered);
        assert_eq!(row.states[2], LetterState::Empty);
    }

    #[test]
    fn test_typing_row_truncates_overflow() {
        let row = GuessRow::typing("abcdefg", 5);
        assert_eq!(row.letters.len(), 5);
    }

    #[test]
    fn test_instructions_follow_state() {
        assert!(instructions(TuiState::EnteringGuess).contains("Submit"));
        assert!(instructions(TuiState::GameOver).contains("New Game"));
    }

    fn render_to_buffer(max_guesses: usize, rows: &[GuessRow]) -> Buffer {
        let ctx = RenderContext {
            rows,
            current_input: "cr",
            word_length: 5,
            max_guesses,
            state: TuiState::EnteringGuess,
            message: "",
            error_message: "",
            status: "Ready",
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, &ctx))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_standard_board() {
        let pattern = FeedbackPattern::parse("GYNNG").unwrap();
        let rows = [GuessRow::scored("crane", &pattern)];
        let text = buffer_text(&render_to_buffer(6, &rows));
        assert!(text.contains("WORDLE"));
        assert!(text.contains(" C "));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_render_huge_guess_budget_fits_screen() {
        // far more rows than any terminal can show
        let text = buffer_text(&render_to_buffer(40_000, &[]));
        assert!(text.contains("Guesses"));
        assert!(text.contains(" C "));
        assert!(text.contains("Messages"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_modifier_detection() {
        let plain = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let shift = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(!has_modifier_keys(&plain));
        assert!(has_modifier_keys(&ctrl));
        assert!(!has_modifier_keys(&shift));
    }
}
