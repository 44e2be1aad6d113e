//! Key reference
//!
//! Lists every binding in [`KEYBINDINGS`], grouped by where it applies.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{format_key, KeyContext, KEYBINDINGS};
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, SceneBehavior, SceneCore};
use crate::tui::widgets::list::render_help_bar;

#[derive(Debug)]
pub struct HelpScene {
    core: SceneCore,
    lines: Vec<Line<'static>>,
    scroll: usize,
    viewport: usize,
}

impl Default for HelpScene {
    fn default() -> Self {
        Self::new()
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut context: Option<KeyContext> = None;
    for binding in KEYBINDINGS {
        if context != Some(binding.context) {
            if context.is_some() {
                lines.push(Line::from(""));
            }
            context = Some(binding.context);
            lines.push(Line::from(Span::styled(
                binding.context.title(),
                Palette::Medium.style(),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>14}  ", format_key(&binding.key)),
                Palette::Title.style(),
            ),
            Span::raw(binding.description),
        ]));
    }
    lines
}

impl HelpScene {
    pub fn new() -> Self {
        Self {
            core: SceneCore::new(),
            lines: help_lines(),
            scroll: 0,
            viewport: 0,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport.max(1))
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = (self.scroll as isize + delta).max(0) as usize;
        self.scroll = next.min(self.max_scroll());
    }

    /// Bordered text area above the one-line hint bar
    fn body(area: Rect) -> Rect {
        Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1))
    }
}

impl SceneBehavior for HelpScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, _ctx: &mut Context<'_>) {
        let page = self.viewport.max(1) as isize;
        match input {
            Input::Up => self.scroll_by(-1),
            Input::Down => self.scroll_by(1),
            Input::PageUp => self.scroll_by(-page),
            Input::PageDown => self.scroll_by(page),
            Input::Home => self.scroll = 0,
            Input::End => self.scroll = self.max_scroll(),
            Input::Mouse {
                kind: MouseKind::ScrollUp,
                ..
            } => self.scroll_by(-3),
            Input::Mouse {
                kind: MouseKind::ScrollDown,
                ..
            } => self.scroll_by(3),
            Input::Esc | Input::Enter => self.core.back(),
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.viewport = Self::body(ctx.area).height.saturating_sub(2) as usize;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let area = frame.area();
        let end = (self.scroll + self.viewport.max(1)).min(self.lines.len());
        let visible = self.lines[self.scroll.min(end)..end].to_vec();

        let block = Block::default()
            .title(format!(
                " Help ({}-{} of {}) ",
                (self.scroll + 1).min(end),
                end,
                self.lines.len()
            ))
            .title_style(Palette::Title.style())
            .borders(Borders::ALL);
        frame.render_widget(Paragraph::new(visible).block(block), Self::body(area));

        if area.height > 0 {
            let help = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            render_help_bar(frame, help, "↑↓ PgUp PgDn Wheel Scroll | Esc Back");
        }
    }
}
