//! Generic modal dialog
//!
//! A message with an ordered list of options. Confirming records the chosen
//! option as the dialog's result; the scene that opened it reads the result
//! from its `on_enter` once control comes back.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::Settings;
use crate::error::FinmanError;
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::{centered_rect_fixed, contains, inner};
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, SceneBehavior, SceneCore};
use crate::tui::widgets::ErrorInfo;

const DIALOG_WIDTH: u16 = 60;

/// Message, options and a single selection cursor
#[derive(Debug)]
pub struct Dialog {
    core: SceneCore,
    title: String,
    message: String,
    options: Vec<String>,
    selected: usize,
    result: Option<String>,
    error: bool,
}

impl Dialog {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            core: SceneCore::new(),
            title: title.into(),
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
            result: None,
            error: false,
        }
    }

    /// Yes/No question, "Yes" selected
    pub fn confirm(message: impl Into<String>) -> Self {
        Self::new("Confirm", message, ["Yes", "No"])
    }

    /// Blocking error report with a single "OK"
    pub fn error(error: &FinmanError) -> Self {
        let info = ErrorInfo::from_error(error);
        let mut dialog = Self::new(info.title.clone(), info.message(), ["OK"]);
        dialog.error = true;
        dialog
    }

    /// The option confirmed by the user, `None` when dismissed
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Record the option at `index` and return to the caller
    pub fn choose(&mut self, index: usize) {
        if let Some(option) = self.options.get(index) {
            self.selected = index;
            self.result = Some(option.clone());
            self.core.back();
        }
    }

    fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Message rows after wrapping to the dialog's inner width
    fn message_rows(&self, width: u16) -> u16 {
        let width = width.max(1) as usize;
        self.message
            .lines()
            .map(|line| line.chars().count().max(1).div_ceil(width) as u16)
            .sum::<u16>()
            .max(1)
    }

    /// Popup area for a terminal of size `area`
    fn popup(&self, area: Rect) -> Rect {
        let width = DIALOG_WIDTH.min(area.width);
        let text_width = width.saturating_sub(4);
        // border, blank, message, blank, options, hint, border
        let height = self.message_rows(text_width) + 6;
        centered_rect_fixed(width, height, area)
    }

    /// One hit box per option, laid out left to right as `[ label ]`
    fn option_boxes(&self, popup: Rect) -> Vec<Rect> {
        let body = inner(popup);
        let y = body.y + body.height.saturating_sub(2);
        let mut x = body.x + 1;
        self.options
            .iter()
            .map(|option| {
                let width = option.chars().count() as u16 + 4;
                let hit = Rect::new(x, y, width, 1).intersection(body);
                x = x.saturating_add(width + 2);
                hit
            })
            .collect()
    }
}

impl SceneBehavior for Dialog {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>) {
        match input {
            Input::Tab | Input::Right | Input::Down => self.select_next(),
            Input::BackTab | Input::Left | Input::Up => self.select_prev(),
            Input::Enter => self.choose(self.selected),
            Input::Esc => self.core.back(),
            Input::Mouse {
                column,
                row,
                kind: MouseKind::Click | MouseKind::DoubleClick,
            } => {
                let boxes = self.option_boxes(self.popup(ctx.area));
                if let Some(index) = boxes.iter().position(|b| contains(*b, column, row)) {
                    self.choose(index);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, _ctx: &mut Context<'_>) {}

    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let popup = self.popup(frame.area());
        frame.render_widget(Clear, popup);

        let accent = if self.error {
            Palette::High.style()
        } else {
            Palette::Title.style()
        };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(accent.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(accent);
        frame.render_widget(block, popup);

        let body = inner(popup);
        let text_area = Rect::new(
            body.x + 1,
            body.y + 1,
            body.width.saturating_sub(2),
            body.height.saturating_sub(4),
        );
        frame.render_widget(
            Paragraph::new(self.message.as_str()).wrap(Wrap { trim: false }),
            text_area,
        );

        let boxes = self.option_boxes(popup);
        for (index, (option, hit)) in self.options.iter().zip(boxes).enumerate() {
            let style = if index == self.selected {
                Palette::Selection.style()
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("[ {} ]", option), style)),
                hit,
            );
        }

        let hint_area = Rect::new(
            body.x + 1,
            body.y + body.height.saturating_sub(1),
            body.width.saturating_sub(2),
            1,
        )
        .intersection(body);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint_line(&[KeyContext::Dialog]),
                Palette::Muted.style(),
            ))),
            hint_area,
        );
    }

    fn is_modal(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;
    use crate::tui::scene::Transition;
    use tempfile::TempDir;

    fn with_context(f: impl FnOnce(&mut Context<'_>)) {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        let settings = Settings::default();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 80, 24),
        };
        f(&mut ctx);
    }

    #[test]
    fn test_enter_records_selected_option() {
        with_context(|ctx| {
            let mut dialog = Dialog::confirm("Delete?");
            dialog.handle_input(Input::Tab, ctx);
            assert_eq!(dialog.selected(), 1);
            dialog.handle_input(Input::Enter, ctx);

            assert_eq!(dialog.result(), Some("No"));
            assert!(matches!(
                dialog.core_mut().take_pending(),
                Some(Transition::Back)
            ));
        });
    }

    #[test]
    fn test_escape_has_no_result() {
        with_context(|ctx| {
            let mut dialog = Dialog::confirm("Delete?");
            dialog.handle_input(Input::Esc, ctx);
            assert_eq!(dialog.result(), None);
            assert!(dialog.core().has_pending());
        });
    }

    #[test]
    fn test_selection_wraps() {
        with_context(|ctx| {
            let mut dialog = Dialog::new("Add", "Add Tag or Subtag?", ["Tag", "Subtag", "Cancel"]);
            dialog.handle_input(Input::BackTab, ctx);
            assert_eq!(dialog.selected(), 2);
            dialog.handle_input(Input::Right, ctx);
            assert_eq!(dialog.selected(), 0);
        });
    }

    #[test]
    fn test_click_confirms_option() {
        with_context(|ctx| {
            let mut dialog = Dialog::confirm("Delete?");
            let boxes = dialog.option_boxes(dialog.popup(ctx.area));
            let no = boxes[1];
            dialog.handle_input(
                Input::Mouse {
                    column: no.x + 1,
                    row: no.y,
                    kind: MouseKind::Click,
                },
                ctx,
            );
            assert_eq!(dialog.result(), Some("No"));
        });
    }

    #[test]
    fn test_error_dialog() {
        let dialog = Dialog::error(&FinmanError::Validation("Amount is required".into()));
        assert_eq!(dialog.title, "Invalid Input");
        assert_eq!(dialog.options, vec!["OK".to_string()]);
        assert!(dialog.message().starts_with("Amount is required"));
        assert!(dialog.is_modal());
    }
}
