//! Text input widget
//!
//! A single-line text buffer with a cursor, used by the search bars and by
//! the free-text fields of the editors. The cursor counts characters, not bytes.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::tui::event::Input;
use crate::tui::palette::Palette;

/// A simple text input buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Shown when empty and unfocused
    pub placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content, cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set(content);
        self
    }

    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Apply an editing key; returns false for keys that are not text edits
    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Char(c) => self.insert(c),
            Input::Backspace => self.backspace(),
            Input::Delete => self.delete(),
            Input::Left => self.move_left(),
            Input::Right => self.move_right(),
            Input::Home => self.move_start(),
            Input::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Spans for drawing, with a block cursor when focused
    pub fn spans(&self, focused: bool) -> Vec<Span<'static>> {
        if !focused {
            if self.content.is_empty() {
                return vec![Span::styled(self.placeholder.clone(), Palette::Muted.style())];
            }
            return vec![Span::styled(
                self.content.clone(),
                Style::default().fg(Color::Yellow),
            )];
        }

        let at = self.byte_index(self.cursor);
        let (before, rest) = self.content.split_at(at);
        let mut chars = rest.chars();
        let under = chars.next().map(String::from).unwrap_or_else(|| "_".into());
        let after: String = chars.collect();

        vec![
            Span::styled(before.to_string(), Style::default().fg(Color::White)),
            Span::styled(under, Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::styled(after, Style::default().fg(Color::White)),
        ]
    }
}
