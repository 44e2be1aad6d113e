//! Event handling for the TUI
//!
//! Crossterm events are normalized into [`Input`] values. Polling is
//! non-blocking up to the tick interval and yields `None` when nothing arrived,
//! so the whole interface runs on a single thread.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use std::io;
use std::time::{Duration, Instant};

/// Two presses on the same cell within this window form a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Kind of mouse gesture delivered to scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Click,
    DoubleClick,
    ScrollUp,
    ScrollDown,
}

/// A normalized input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    BackTab,
    Enter,
    Esc,
    Backspace,
    Delete,
    Function(u8),
    /// Control chord, always lowercase
    Ctrl(char),
    /// Printable character
    Char(char),
    Mouse {
        column: u16,
        row: u16,
        kind: MouseKind,
    },
    Resize {
        width: u16,
        height: u16,
    },
}

/// Anything the controller can pull input from
pub trait InputSource {
    /// Wait at most one tick; `Ok(None)` means nothing happened
    fn poll(&mut self) -> io::Result<Option<Input>>;
}

/// Tracks the last left press to detect double clicks
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(u16, u16, Instant)>,
}

impl ClickTracker {
    pub fn register(&mut self, column: u16, row: u16, now: Instant) -> MouseKind {
        match self.last {
            Some((c, r, at))
                if c == column && r == row && now.duration_since(at) <= DOUBLE_CLICK_WINDOW =>
            {
                self.last = None;
                MouseKind::DoubleClick
            }
            _ => {
                self.last = Some((column, row, now));
                MouseKind::Click
            }
        }
    }
}

/// Input source backed by the real terminal
#[derive(Debug)]
pub struct TerminalEvents {
    tick_rate: Duration,
    clicks: ClickTracker,
}

impl TerminalEvents {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            clicks: ClickTracker::default(),
        }
    }

    fn translate(&mut self, event: CrosstermEvent) -> Option<Input> {
        match event {
            CrosstermEvent::Key(key) => translate_key(key),
            CrosstermEvent::Mouse(mouse) => self.translate_mouse(mouse),
            CrosstermEvent::Resize(width, height) => Some(Input::Resize { width, height }),
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<Input> {
        let (column, row) = (mouse.column, mouse.row);
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.clicks.register(column, row, Instant::now())
            }
            MouseEventKind::ScrollUp => MouseKind::ScrollUp,
            MouseEventKind::ScrollDown => MouseKind::ScrollDown,
            _ => return None,
        };
        Some(Input::Mouse { column, row, kind })
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl InputSource for TerminalEvents {
    fn poll(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        Ok(self.translate(event::read()?))
    }
}

/// Map a key press; releases and repeats from platforms that report them are dropped
pub fn translate_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match key.code {
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::Left => Input::Left,
        KeyCode::Right => Input::Right,
        KeyCode::PageUp => Input::PageUp,
        KeyCode::PageDown => Input::PageDown,
        KeyCode::Home => Input::Home,
        KeyCode::End => Input::End,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Input::BackTab,
        KeyCode::Tab => Input::Tab,
        KeyCode::BackTab => Input::BackTab,
        KeyCode::Enter => Input::Enter,
        KeyCode::Esc => Input::Esc,
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Delete => Input::Delete,
        KeyCode::F(n) => Input::Function(n),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Input::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Input::Char(c),
        _ => return None,
    };
    Some(input)
}
