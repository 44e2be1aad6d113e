//! Root menu

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{BudgetScene, HelpScene, OverviewScene, TransactionsScene};
use crate::config::Settings;
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::{centered_rect_fixed, contains, inner};
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, SceneBehavior, SceneCore};
use crate::tui::widgets::list::render_help_bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Overview,
    Transactions,
    Budget,
    Help,
    Quit,
}

const ITEMS: [MenuItem; 5] = [
    MenuItem::Overview,
    MenuItem::Transactions,
    MenuItem::Budget,
    MenuItem::Help,
    MenuItem::Quit,
];

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Overview => "Overview",
            MenuItem::Transactions => "Transactions",
            MenuItem::Budget => "Budget",
            MenuItem::Help => "Help",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug)]
pub struct MainMenu {
    core: SceneCore,
    selected: usize,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            core: SceneCore::new(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn menu_area(area: Rect) -> Rect {
        let body = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        centered_rect_fixed(32, ITEMS.len() as u16 + 4, body)
    }

    /// First row of menu entries inside the box
    fn items_top(area: Rect) -> u16 {
        inner(Self::menu_area(area)).y + 1
    }

    fn open(&mut self) {
        match ITEMS[self.selected] {
            MenuItem::Overview => self.core.push(OverviewScene::new()),
            MenuItem::Transactions => self.core.push(TransactionsScene::new()),
            MenuItem::Budget => self.core.push(BudgetScene::new()),
            MenuItem::Help => self.core.push(HelpScene::new()),
            MenuItem::Quit => self.core.quit(),
        }
    }
}

impl SceneBehavior for MainMenu {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>) {
        match input {
            Input::Up => self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len(),
            Input::Down | Input::Tab => self.selected = (self.selected + 1) % ITEMS.len(),
            Input::Home => self.selected = 0,
            Input::End => self.selected = ITEMS.len() - 1,
            Input::Enter => self.open(),
            Input::Esc => self.core.back(),
            Input::Mouse {
                column,
                row,
                kind: MouseKind::Click | MouseKind::DoubleClick,
            } => {
                let area = inner(Self::menu_area(ctx.area));
                let top = Self::items_top(ctx.area);
                if contains(area, column, row) && row >= top {
                    let index = (row - top) as usize;
                    if index < ITEMS.len() {
                        self.selected = index;
                        self.open();
                    }
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, _ctx: &mut Context<'_>) {}

    fn render(&self, frame: &mut Frame, _settings: &Settings) {
        let area = frame.area();
        let menu = Self::menu_area(area);

        let mut lines = vec![Line::from("")];
        for (index, item) in ITEMS.iter().enumerate() {
            let label = format!("  {:<26}", item.label());
            if index == self.selected {
                lines.push(Line::from(Span::styled(label, Palette::Selection.style())));
            } else {
                lines.push(Line::from(label));
            }
        }

        let block = Block::default()
            .title(" finman ")
            .title_style(Palette::Title.style())
            .borders(Borders::ALL)
            .border_style(Palette::Title.style());
        frame.render_widget(Paragraph::new(lines).block(block), menu);

        if area.height > 0 {
            let help = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            render_help_bar(frame, help, &hint_line(&[KeyContext::Menu]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;
    use crate::tui::scene::Transition;
    use tempfile::TempDir;

    #[test]
    fn test_selection_wraps() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        let settings = Settings::default();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 80, 24),
        };

        let mut menu = MainMenu::new();
        menu.handle_input(Input::Up, &mut ctx);
        assert_eq!(menu.selected(), ITEMS.len() - 1);
        menu.handle_input(Input::Down, &mut ctx);
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn test_quit_entry_and_click() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        let settings = Settings::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area,
        };

        let mut menu = MainMenu::new();
        menu.handle_input(Input::End, &mut ctx);
        menu.handle_input(Input::Enter, &mut ctx);
        assert!(matches!(menu.core.take_pending(), Some(Transition::Quit)));

        // click the "Budget" row
        let top = MainMenu::items_top(area);
        let x = inner(MainMenu::menu_area(area)).x + 2;
        menu.handle_input(
            Input::Mouse {
                column: x,
                row: top + 2,
                kind: MouseKind::Click,
            },
            &mut ctx,
        );
        assert_eq!(menu.selected(), 2);
        match menu.core.take_pending() {
            Some(Transition::Push(scene)) => assert_eq!(scene.name(), "budget"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
