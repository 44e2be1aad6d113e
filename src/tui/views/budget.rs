//! Budget scene
//!
//! Tags of the selected period with their subtags nested beneath them.
//! Adding first asks whether to add a tag or a subtag; the answer is picked up
//! in `on_enter` when the chooser returns.

use std::cmp::Ordering;

use ratatui::{
    text::{Line, Span},
    Frame,
};
use tracing::warn;

use super::{list_click, ListClick};
use crate::config::Settings;
use crate::error::FinmanResult;
use crate::models::{Money, Period, Tag};
use crate::storage::Store;
use crate::tui::dialogs::{BudgetEditor, Dialog};
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::ListLayout;
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, Scene, SceneBehavior, SceneCore};
use crate::tui::widgets::list::{
    matches_any, render_help_bar, render_rows, render_search_bar, render_sort_panel,
};
use crate::tui::widgets::{ListState, PeriodCursor, SortMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSort {
    NameAsc,
    NameDesc,
    AmountAsc,
    AmountDesc,
}

impl SortMode for BudgetSort {
    const ALL: &'static [Self] = &[
        BudgetSort::NameAsc,
        BudgetSort::NameDesc,
        BudgetSort::AmountAsc,
        BudgetSort::AmountDesc,
    ];

    fn label(&self) -> &'static str {
        match self {
            BudgetSort::NameAsc => "Name ↑",
            BudgetSort::NameDesc => "Name ↓",
            BudgetSort::AmountAsc => "Amount ↑",
            BudgetSort::AmountDesc => "Amount ↓",
        }
    }
}

/// One tag or subtag line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub id: String,
    pub name: String,
    pub max_amount: Money,
    /// Set for subtags
    pub parent_id: Option<String>,
}

impl BudgetSort {
    fn compare(self, a: &BudgetRow, b: &BudgetRow) -> Ordering {
        match self {
            BudgetSort::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            BudgetSort::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            BudgetSort::AmountAsc => a.max_amount.cmp(&b.max_amount),
            BudgetSort::AmountDesc => b.max_amount.cmp(&a.max_amount),
        }
    }
}

/// Sort tags, then each tag's subtags, and flatten. Filtering keeps every row
/// that matches on its own name, id or amount.
pub fn arrange(tags: &[Tag], sort: BudgetSort, query: &str) -> Vec<BudgetRow> {
    let mut groups: Vec<(BudgetRow, Vec<BudgetRow>)> = tags
        .iter()
        .map(|tag| {
            let subs = tag
                .sub_tags
                .iter()
                .map(|sub| BudgetRow {
                    id: sub.id.clone(),
                    name: sub.name.clone(),
                    max_amount: sub.max_amount,
                    parent_id: Some(tag.id.clone()),
                })
                .collect();
            let row = BudgetRow {
                id: tag.id.clone(),
                name: tag.name.clone(),
                max_amount: tag.max_amount,
                parent_id: None,
            };
            (row, subs)
        })
        .collect();

    groups.sort_by(|a, b| sort.compare(&a.0, &b.0));
    groups
        .into_iter()
        .flat_map(|(tag, mut subs)| {
            subs.sort_by(|a, b| sort.compare(a, b));
            std::iter::once(tag).chain(subs)
        })
        .filter(|row| matches_any(query, &[&row.name, &row.id, &row.max_amount.to_string()]))
        .collect()
}

/// Follow-up owed once a modal returns
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    /// The "Tag or Subtag?" chooser is open
    ChooseAddKind,
    Delete(BudgetRow),
}

#[derive(Debug)]
pub struct BudgetScene {
    core: SceneCore,
    list: ListState<BudgetSort>,
    periods: PeriodCursor,
    rows: Vec<BudgetRow>,
    layout: ListLayout,
    pending: Option<PendingAction>,
}

impl Default for BudgetScene {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetScene {
    pub fn new() -> Self {
        Self {
            core: SceneCore::new(),
            list: ListState::new(BudgetSort::NameAsc),
            periods: PeriodCursor::default(),
            rows: Vec::new(),
            layout: ListLayout::default(),
            pending: None,
        }
    }

    pub fn period(&self) -> Option<Period> {
        self.periods.current()
    }

    pub fn rows(&self) -> &[BudgetRow] {
        &self.rows
    }

    fn selected(&self) -> Option<&BudgetRow> {
        self.rows.get(self.list.selected)
    }

    /// Parent tag of the selected row, used to preselect a new subtag's parent
    fn selected_tag_id(&self) -> Option<String> {
        self.selected()
            .map(|row| row.parent_id.clone().unwrap_or_else(|| row.id.clone()))
    }

    fn edit_selected(&mut self, store: &Store) {
        let (Some(period), Some(row)) = (self.periods.current(), self.selected()) else {
            return;
        };
        let Some(budget) = store.get_budget(period.year, period.month) else {
            return;
        };
        let editor = match &row.parent_id {
            None => budget.find_tag(&row.id).map(|tag| BudgetEditor::edit_tag(period, tag)),
            Some(parent) => budget
                .find_tag(parent)
                .and_then(|tag| tag.find_subtag(&row.id))
                .map(|sub| BudgetEditor::edit_subtag(period, parent, sub)),
        };
        if let Some(editor) = editor {
            self.core.push(editor);
        }
    }

    fn confirm_delete(&mut self) {
        let Some(row) = self.selected().cloned() else {
            return;
        };
        let message = match &row.parent_id {
            None => format!("Delete tag '{}' and its subtags?", row.name),
            Some(parent) => format!("Delete subtag '{}' of '{}'?", row.name, parent),
        };
        self.pending = Some(PendingAction::Delete(row));
        self.core.push(Dialog::confirm(message));
    }

    fn delete(&self, store: &mut Store, row: &BudgetRow) -> FinmanResult<()> {
        let Some(period) = self.periods.current() else {
            return Ok(());
        };
        match &row.parent_id {
            None => store.remove_tag(period.year, period.month, &row.id),
            Some(parent) => store.remove_subtag(period.year, period.month, parent, &row.id),
        }
    }

    fn change_period(&mut self, forward: bool) {
        if forward {
            self.periods.next();
        } else {
            self.periods.prev();
        }
        self.list.reset_position();
    }

    fn row_line(row: &BudgetRow, settings: &Settings) -> Line<'static> {
        let amount = Span::styled(
            format!("{:>12}", row.max_amount.format_with_symbol(&settings.currency_symbol)),
            Palette::Medium.style(),
        );
        match &row.parent_id {
            None => Line::from(vec![
                Span::styled(format!("{:<28}", row.name), Palette::Title.style()),
                Span::styled(format!("{:<16}", row.id), Palette::Muted.style()),
                amount,
            ]),
            Some(_) => Line::from(vec![
                Span::raw(format!("{:<28}", format!("  └─ {}", row.name))),
                Span::styled(format!("{:<16}", row.id), Palette::Muted.style()),
                amount,
            ]),
        }
    }
}

impl SceneBehavior for BudgetScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>) {
        match input {
            Input::Esc => self.core.back(),
            Input::Left => self.change_period(false),
            Input::Right => self.change_period(true),
            Input::Ctrl('a') => {
                self.pending = Some(PendingAction::ChooseAddKind);
                self.core.push(Dialog::new(
                    "Add",
                    "Add Tag or Subtag?",
                    ["Tag", "Subtag", "Cancel"],
                ));
            }
            Input::Enter => self.edit_selected(ctx.store),
            Input::Ctrl('d') => self.confirm_delete(),
            Input::Mouse {
                column,
                row,
                kind: kind @ (MouseKind::Click | MouseKind::DoubleClick),
            } => match list_click(&self.layout, column, row) {
                Some(ListClick::Sort(index)) => {
                    self.list.select_sort(index);
                }
                Some(ListClick::Row(offset)) => {
                    if self.list.select_visible(offset) && kind == MouseKind::DoubleClick {
                        self.edit_selected(ctx.store);
                    }
                }
                Some(ListClick::PrevPeriod) => self.change_period(false),
                Some(ListClick::NextPeriod) => self.change_period(true),
                None => {}
            },
            _ => {
                self.list.handle_common(input);
            }
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.layout = ListLayout::new(ctx.area);
        self.periods.refresh(ctx.store.periods());

        let query = self.list.query();
        self.rows = self
            .periods
            .current()
            .and_then(|p| ctx.store.get_budget(p.year, p.month))
            .map(|budget| arrange(&budget.tags, self.list.sort, &query))
            .unwrap_or_default();
        self.list.clamp(self.rows.len(), self.layout.viewport());
    }

    fn on_enter(&mut self, ctx: &mut Context<'_>, returned: Option<Scene>) {
        let Some(action) = self.pending.take() else {
            return;
        };
        let choice = returned.as_ref().and_then(Scene::dialog_result);
        match (action, choice) {
            (PendingAction::ChooseAddKind, Some("Tag")) => {
                self.core.push(BudgetEditor::add_tag(self.periods.current()));
            }
            (PendingAction::ChooseAddKind, Some("Subtag")) => {
                let parent = self.selected_tag_id();
                let editor =
                    BudgetEditor::add_subtag(ctx.store, self.periods.current(), parent.as_deref());
                self.core.push(editor);
            }
            (PendingAction::Delete(row), Some("Yes")) => {
                if let Err(err) = self.delete(ctx.store, &row) {
                    warn!(error = %err, id = %row.id, "Delete failed");
                    self.core.push(Dialog::error(&err));
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, settings: &Settings) {
        render_search_bar(
            frame,
            self.layout.search_bar,
            "Budget",
            &self.list,
            Some(self.periods.current()),
        );
        render_sort_panel(frame, self.layout.sort_panel, self.list.sort);

        let lines: Vec<Line<'static>> = self
            .rows
            .iter()
            .map(|row| Self::row_line(row, settings))
            .collect();
        let empty = if self.periods.current().is_none() {
            "No budgets yet. Press Ctrl+A to add a tag."
        } else {
            "No matching tags."
        };
        render_rows(frame, self.layout.list, "Tags", &lines, &self.list, empty);

        render_help_bar(
            frame,
            self.layout.help_bar,
            &hint_line(&[KeyContext::List, KeyContext::Periods, KeyContext::Editable]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubTag;
    use crate::tui::scene::Transition;
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn tags() -> Vec<Tag> {
        vec![
            Tag::new("rent", "Rent", Money::from_cents(120000)),
            Tag::new("food", "Food", Money::from_cents(30000)).with_sub_tags(vec![
                SubTag::new("groceries", "Groceries", Money::from_cents(20000)),
                SubTag::new("dining", "Dining", Money::from_cents(10000)),
            ]),
        ]
    }

    fn ids(rows: &[BudgetRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_subtags_follow_their_parent() {
        let rows = arrange(&tags(), BudgetSort::NameAsc, "");
        assert_eq!(ids(&rows), ["food", "dining", "groceries", "rent"]);

        let rows = arrange(&tags(), BudgetSort::AmountDesc, "");
        assert_eq!(ids(&rows), ["rent", "food", "groceries", "dining"]);
    }

    #[test]
    fn test_search_over_name_id_and_amount() {
        assert_eq!(ids(&arrange(&tags(), BudgetSort::NameAsc, "groc")), ["groceries"]);
        assert_eq!(ids(&arrange(&tags(), BudgetSort::NameAsc, "1200.00")), ["rent"]);
        assert_eq!(ids(&arrange(&tags(), BudgetSort::NameAsc, "food")), ["food"]);
    }

    fn context_store(temp: &TempDir) -> Store {
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        store.add_budget(2024, 6, tags()).unwrap();
        store
    }

    #[test]
    fn test_delete_waits_for_yes() {
        let temp = TempDir::new().unwrap();
        let mut store = context_store(&temp);
        let settings = Settings::default();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 100, 30),
        };

        let mut scene = BudgetScene::new();
        scene.update(&mut ctx);
        // food, dining, groceries, rent: select "dining"
        scene.handle_input(Input::Down, &mut ctx);
        scene.handle_input(Input::Ctrl('d'), &mut ctx);
        let dialog = match scene.core.take_pending() {
            Some(Transition::Push(dialog)) => *dialog,
            other => panic!("expected dialog, got {:?}", other),
        };

        // dismissed: nothing happens and the token is cleared
        scene.on_enter(&mut ctx, Some(dialog));
        assert!(scene.pending.is_none());
        let food = ctx.store.get_budget(2024, 6).unwrap().find_tag("food").unwrap();
        assert_eq!(food.sub_tags.len(), 2);

        scene.handle_input(Input::Ctrl('d'), &mut ctx);
        let mut dialog = match scene.core.take_pending() {
            Some(Transition::Push(dialog)) => *dialog,
            other => panic!("expected dialog, got {:?}", other),
        };
        if let Scene::Dialog(d) = &mut dialog {
            d.choose(0);
        }
        scene.on_enter(&mut ctx, Some(dialog));

        let food = ctx.store.get_budget(2024, 6).unwrap().find_tag("food").unwrap();
        assert_eq!(ids_of(&food.sub_tags), ["groceries"]);
    }

    fn ids_of(subs: &[SubTag]) -> Vec<&str> {
        subs.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_add_tag_choice_opens_editor() {
        let temp = TempDir::new().unwrap();
        let mut store = context_store(&temp);
        let settings = Settings::default();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 100, 30),
        };

        let mut scene = BudgetScene::new();
        scene.update(&mut ctx);
        scene.handle_input(Input::Ctrl('a'), &mut ctx);
        let mut chooser = match scene.core.take_pending() {
            Some(Transition::Push(dialog)) => *dialog,
            other => panic!("expected chooser, got {:?}", other),
        };
        if let Scene::Dialog(d) = &mut chooser {
            d.choose(0);
        }
        scene.on_enter(&mut ctx, Some(chooser));

        match scene.core.take_pending() {
            Some(Transition::Push(editor)) => match *editor {
                Scene::BudgetEditor(editor) => {
                    assert_eq!(editor.form().value(0), "2024");
                    assert_eq!(editor.form().value(1), "6");
                }
                other => panic!("unexpected {}", other.name()),
            },
            other => panic!("expected editor, got {:?}", other),
        }
    }
}
