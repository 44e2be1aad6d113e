//! Transactions scene
//!
//! Every recorded transaction, searchable by text or by `#tag` / `#tag/subtag`.

use std::cmp::Ordering;

use ratatui::{
    text::{Line, Span},
    Frame,
};
use tracing::warn;

use super::{list_click, ListClick};
use crate::config::Settings;
use crate::models::Transaction;
use crate::tui::dialogs::{Dialog, TransactionEditor};
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::ListLayout;
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, Scene, SceneBehavior, SceneCore};
use crate::tui::widgets::list::{
    matches_any, render_help_bar, render_rows, render_search_bar, render_sort_panel,
};
use crate::tui::widgets::{ListState, SortMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSort {
    DateAsc,
    DateDesc,
    AmountAsc,
    AmountDesc,
    TagAsc,
    TagDesc,
}

impl SortMode for TransactionSort {
    const ALL: &'static [Self] = &[
        TransactionSort::DateAsc,
        TransactionSort::DateDesc,
        TransactionSort::AmountAsc,
        TransactionSort::AmountDesc,
        TransactionSort::TagAsc,
        TransactionSort::TagDesc,
    ];

    fn label(&self) -> &'static str {
        match self {
            TransactionSort::DateAsc => "Date ↑",
            TransactionSort::DateDesc => "Date ↓",
            TransactionSort::AmountAsc => "Amount ↑",
            TransactionSort::AmountDesc => "Amount ↓",
            TransactionSort::TagAsc => "Tag ↑",
            TransactionSort::TagDesc => "Tag ↓",
        }
    }
}

fn date_key(t: &Transaction) -> (i32, u32, u32) {
    (t.year, t.month, t.day)
}

impl TransactionSort {
    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            TransactionSort::DateAsc => date_key(a).cmp(&date_key(b)),
            TransactionSort::DateDesc => date_key(b).cmp(&date_key(a)),
            TransactionSort::AmountAsc => a.amount.cmp(&b.amount),
            TransactionSort::AmountDesc => b.amount.cmp(&a.amount),
            TransactionSort::TagAsc => a.tag_path().cmp(&b.tag_path()),
            TransactionSort::TagDesc => b.tag_path().cmp(&a.tag_path()),
        }
    }
}

/// How the search text selects transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    All,
    /// Case-insensitive substring of description, date, amount or tag path
    Text(String),
    /// `#tag` or `#tag/subtag`: exact tag path
    Tag { tag: String, subtag: Option<String> },
}

impl Search {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix('#') {
            Some("") => Search::All,
            Some(path) => match path.split_once('/') {
                Some((tag, subtag)) => Search::Tag {
                    tag: tag.to_string(),
                    subtag: Some(subtag).filter(|s| !s.is_empty()).map(String::from),
                },
                None => Search::Tag {
                    tag: path.to_string(),
                    subtag: None,
                },
            },
            None if raw.is_empty() => Search::All,
            None => Search::Text(raw.to_lowercase()),
        }
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        match self {
            Search::All => true,
            Search::Text(query) => matches_any(
                query,
                &[
                    &t.description,
                    &t.date_string(),
                    &t.amount.to_string(),
                    &t.tag_path(),
                ],
            ),
            Search::Tag { tag, subtag } => t.matches_tag(tag, subtag.as_deref()),
        }
    }
}

/// Stable sort, then filter
pub fn arrange(
    transactions: &[Transaction],
    sort: TransactionSort,
    search: &Search,
) -> Vec<Transaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows.into_iter()
        .filter(|t| search.matches(t))
        .cloned()
        .collect()
}

/// Follow-up owed once a modal returns
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    Delete(String),
}

#[derive(Debug)]
pub struct TransactionsScene {
    core: SceneCore,
    list: ListState<TransactionSort>,
    rows: Vec<Transaction>,
    layout: ListLayout,
    pending: Option<PendingAction>,
}

impl Default for TransactionsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionsScene {
    pub fn new() -> Self {
        Self {
            core: SceneCore::new(),
            list: ListState::new(TransactionSort::DateDesc),
            rows: Vec::new(),
            layout: ListLayout::default(),
            pending: None,
        }
    }

    pub fn search_text(&self) -> &str {
        self.list.search.value()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    fn selected(&self) -> Option<&Transaction> {
        self.rows.get(self.list.selected)
    }

    fn edit_selected(&mut self, ctx: &mut Context<'_>) {
        if let Some(txn) = self.selected() {
            let editor = TransactionEditor::edit(ctx.store, txn);
            self.core.push(editor);
        }
    }

    fn confirm_delete(&mut self) {
        let Some(txn) = self.selected() else {
            return;
        };
        let id = txn.id.clone();
        let message = format!(
            "Delete transaction '{}' ({} on {})?",
            txn.description,
            txn.amount,
            txn.date_string()
        );
        self.pending = Some(PendingAction::Delete(id));
        self.core.push(Dialog::confirm(message));
    }

    fn row_line(t: &Transaction, settings: &Settings) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{}  ", t.date_string())),
            Span::styled(
                format!("{:>10}", t.amount.format_with_symbol(&settings.currency_symbol)),
                Palette::Medium.style(),
            ),
            Span::styled(format!("  {:<20}  ", t.tag_path()), Palette::Title.style()),
            Span::raw(t.description.clone()),
        ])
    }
}

impl SceneBehavior for TransactionsScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>) {
        match input {
            Input::Esc => self.core.back(),
            Input::Ctrl('a') => {
                let editor = TransactionEditor::add(ctx.store);
                self.core.push(editor);
            }
            Input::Enter => self.edit_selected(ctx),
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
                        self.edit_selected(ctx);
                    }
                }
                _ => {}
            },
            _ => {
                self.list.handle_common(input);
            }
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        self.layout = ListLayout::new(ctx.area);
        let search = Search::parse(self.list.search.value());
        self.rows = arrange(ctx.store.get_all_transactions(), self.list.sort, &search);
        self.list.clamp(self.rows.len(), self.layout.viewport());
    }

    fn on_enter(&mut self, ctx: &mut Context<'_>, returned: Option<Scene>) {
        let Some(action) = self.pending.take() else {
            return;
        };
        let confirmed = returned.as_ref().and_then(Scene::dialog_result) == Some("Yes");
        match action {
            PendingAction::Delete(id) if confirmed => {
                if let Err(err) = ctx.store.remove_transaction(&id) {
                    warn!(error = %err, id = %id, "Delete failed");
                    self.core.push(Dialog::error(&err));
                }
            }
            PendingAction::Delete(_) => {}
        }
    }

    fn render(&self, frame: &mut Frame, settings: &Settings) {
        render_search_bar(
            frame,
            self.layout.search_bar,
            "Transactions",
            &self.list,
            None,
        );
        render_sort_panel(frame, self.layout.sort_panel, self.list.sort);

        let lines: Vec<Line<'static>> = self
            .rows
            .iter()
            .map(|t| Self::row_line(t, settings))
            .collect();
        render_rows(
            frame,
            self.layout.list,
            "Transactions",
            &lines,
            &self.list,
            "No transactions. Press Ctrl+A to add one.",
        );

        render_help_bar(
            frame,
            self.layout.help_bar,
            &hint_line(&[KeyContext::List, KeyContext::Editable]),
        );
    }
}
