//! Keybinding definitions
//!
//! One table drives both the Help scene and the hint bar under each list.

use super::event::{Input, MouseKind};

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// The key
    pub key: Input,
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
    /// Whether the key is advertised in the hint bar
    pub hint: bool,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Main menu
    Menu,
    /// Any of the three list scenes
    List,
    /// Budget and Overview, which page through periods
    Periods,
    /// Budget and Transactions, which can be edited
    Editable,
    /// Transaction and budget editors
    Editor,
    /// Confirmation and error dialogs
    Dialog,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            KeyContext::Menu => "Main Menu",
            KeyContext::List => "Lists",
            KeyContext::Periods => "Budget & Overview",
            KeyContext::Editable => "Budget & Transactions",
            KeyContext::Editor => "Editors",
            KeyContext::Dialog => "Dialogs",
        }
    }
}

const fn kb(key: Input, description: &'static str, context: KeyContext, hint: bool) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
        hint,
    }
}

const CLICK: Input = Input::Mouse {
    column: 0,
    row: 0,
    kind: MouseKind::Click,
};

const DOUBLE_CLICK: Input = Input::Mouse {
    column: 0,
    row: 0,
    kind: MouseKind::DoubleClick,
};

const WHEEL: Input = Input::Mouse {
    column: 0,
    row: 0,
    kind: MouseKind::ScrollDown,
};

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    kb(Input::Up, "Previous option", KeyContext::Menu, true),
    kb(Input::Down, "Next option", KeyContext::Menu, true),
    kb(Input::Enter, "Open", KeyContext::Menu, true),
    kb(Input::Esc, "Quit", KeyContext::Menu, true),
    kb(Input::Up, "Move selection up", KeyContext::List, true),
    kb(Input::Down, "Move selection down", KeyContext::List, false),
    kb(Input::PageUp, "Scroll one page up", KeyContext::List, false),
    kb(Input::PageDown, "Scroll one page down", KeyContext::List, false),
    kb(Input::Home, "First row", KeyContext::List, false),
    kb(Input::End, "Last row", KeyContext::List, false),
    kb(Input::Tab, "Next sort mode", KeyContext::List, true),
    kb(Input::BackTab, "Previous sort mode", KeyContext::List, false),
    kb(Input::Char('a'), "Type to search", KeyContext::List, false),
    kb(Input::Backspace, "Delete search character", KeyContext::List, false),
    kb(CLICK, "Select row or sort mode", KeyContext::List, false),
    kb(WHEEL, "Scroll", KeyContext::List, false),
    kb(Input::Esc, "Back", KeyContext::List, true),
    kb(Input::Left, "Previous period", KeyContext::Periods, true),
    kb(Input::Right, "Next period", KeyContext::Periods, false),
    kb(Input::Ctrl('a'), "Add", KeyContext::Editable, true),
    kb(Input::Enter, "Edit selected", KeyContext::Editable, true),
    kb(Input::Ctrl('d'), "Delete selected", KeyContext::Editable, true),
    kb(DOUBLE_CLICK, "Edit row", KeyContext::Editable, false),
    kb(Input::Tab, "Next field", KeyContext::Editor, true),
    kb(Input::BackTab, "Previous field", KeyContext::Editor, false),
    kb(Input::Up, "Cycle choice", KeyContext::Editor, true),
    kb(Input::Enter, "Save", KeyContext::Editor, true),
    kb(Input::Esc, "Cancel", KeyContext::Editor, true),
    kb(Input::Tab, "Next option", KeyContext::Dialog, true),
    kb(Input::Enter, "Confirm", KeyContext::Dialog, true),
    kb(Input::Esc, "Dismiss", KeyContext::Dialog, true),
];

/// Get keybindings for the given contexts, in table order
pub fn get_keybindings(contexts: &[KeyContext]) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| contexts.contains(&kb.context))
        .collect()
}

/// Format a key for display
pub fn format_key(key: &Input) -> String {
    match key {
        Input::Up => "↑".to_string(),
        Input::Down => "↓".to_string(),
        Input::Left => "←".to_string(),
        Input::Right => "→".to_string(),
        Input::PageUp => "PgUp".to_string(),
        Input::PageDown => "PgDn".to_string(),
        Input::Home => "Home".to_string(),
        Input::End => "End".to_string(),
        Input::Tab => "Tab".to_string(),
        Input::BackTab => "Shift+Tab".to_string(),
        Input::Enter => "Enter".to_string(),
        Input::Esc => "Esc".to_string(),
        Input::Backspace => "Backspace".to_string(),
        Input::Delete => "Delete".to_string(),
        Input::Function(n) => format!("F{}", n),
        Input::Ctrl(c) => format!("Ctrl+{}", c.to_ascii_uppercase()),
        Input::Char(_) => "Text".to_string(),
        Input::Mouse { kind, .. } => match kind {
            MouseKind::Click => "Click".to_string(),
            MouseKind::DoubleClick => "Double-click".to_string(),
            MouseKind::ScrollUp | MouseKind::ScrollDown => "Wheel".to_string(),
        },
        Input::Resize { .. } => "Resize".to_string(),
    }
}

/// One-line hint text such as `↑ Move selection up | Tab Next sort mode`
pub fn hint_line(contexts: &[KeyContext]) -> String {
    get_keybindings(contexts)
        .into_iter()
        .filter(|kb| kb.hint)
        .map(|kb| format!("{} {}", format_key(&kb.key), kb.description))
        .collect::<Vec<_>>()
        .join(" | ")
}
