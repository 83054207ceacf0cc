//! Application state and keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use vignette_core::{Phase, Session};

/// Cursor-addressed text input state for the free-text dialog field.
///
/// The cursor is a byte offset into the text, moved along `char_indices`
/// boundaries so multi-byte input stays intact.
#[derive(Debug, Default)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cursor position as a byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear the field and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor = prev;
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.cursor = next;
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor past the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}

/// Main application state for the single-screen widget.
pub struct App {
    /// The running interaction session.
    pub session: Session,
    /// Highlighted option in the browsing list.
    pub highlight: usize,
    /// Free-text field state while the dialog solicits a response.
    pub field: TextField,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Last rejected interaction, shown in the status bar.
    pub error: Option<String>,
}

impl App {
    /// Create a new app over a session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            highlight: 0,
            field: TextField::new(),
            should_quit: false,
            error: None,
        }
    }

    /// Number of options in the scenario on screen.
    pub fn option_count(&self) -> usize {
        self.session
            .current_scenario()
            .map(|s| s.options.len())
            .unwrap_or(0)
    }

    /// Handle a key press, routed by the session phase.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.session.phase() {
            Phase::Browsing => self.handle_browsing_key(key),
            Phase::ReviewingOutcome => self.handle_reviewing_key(key),
        }
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlight = self.highlight.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.option_count();
                if self.highlight + 1 < count {
                    self.highlight += 1;
                }
            }
            KeyCode::Enter => self.select(self.highlight),
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    let digit = digit as usize;
                    if (1..=self.option_count()).contains(&digit) {
                        self.select(digit - 1);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_reviewing_key(&mut self, key: KeyEvent) {
        let editing = self
            .session
            .selected_choice()
            .is_some_and(|c| c.requires_free_text);
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.dismiss(),
            KeyCode::Backspace if editing => {
                self.field.backspace();
                self.sync_free_text();
            }
            KeyCode::Delete if editing => {
                self.field.delete_char();
                self.sync_free_text();
            }
            KeyCode::Left if editing => self.field.move_left(),
            KeyCode::Right if editing => self.field.move_right(),
            KeyCode::Home if editing => self.field.move_home(),
            KeyCode::End if editing => self.field.move_end(),
            KeyCode::Char(c) if editing => {
                self.field.insert(c);
                self.sync_free_text();
            }
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        match self.session.select_option(index) {
            Ok(()) => {
                self.error = None;
                self.highlight = index;
                self.field.clear();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn dismiss(&mut self) {
        let before = self.session.current_id().clone();
        match self.session.dismiss_dialog() {
            Ok(()) => {
                self.error = None;
                self.field.clear();
                if self.session.current_id() != &before {
                    self.highlight = 0;
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Mirror the field into the session's free-text buffer.
    fn sync_free_text(&mut self) {
        let text = self.field.text().to_string();
        self.session.update_free_text(text);
    }
}
