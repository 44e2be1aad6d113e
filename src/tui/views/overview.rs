//! Budget overview scene
//!
//! Spending against every tag and subtag limit for the selected period.

use std::cmp::Ordering;

use ratatui::{
    text::{Line, Span},
    Frame,
};

use super::{list_click, ListClick};
use crate::config::Settings;
use crate::models::Period;
use crate::reports::{progress_bar, BudgetOverviewReport, TagUsage, UsageRow};
use crate::tui::event::{Input, MouseKind};
use crate::tui::keybindings::{hint_line, KeyContext};
use crate::tui::layout::ListLayout;
use crate::tui::palette::Palette;
use crate::tui::scene::{Context, SceneBehavior, SceneCore};
use crate::tui::widgets::list::{
    matches_any, render_help_bar, render_rows, render_search_bar, render_sort_panel,
};
use crate::tui::widgets::{ListState, PeriodCursor, SortMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewSort {
    NameAsc,
    NameDesc,
    UsageAsc,
    UsageDesc,
}

impl SortMode for OverviewSort {
    const ALL: &'static [Self] = &[
        OverviewSort::NameAsc,
        OverviewSort::NameDesc,
        OverviewSort::UsageAsc,
        OverviewSort::UsageDesc,
    ];

    fn label(&self) -> &'static str {
        match self {
            OverviewSort::NameAsc => "Name ↑",
            OverviewSort::NameDesc => "Name ↓",
            OverviewSort::UsageAsc => "Usage ↑",
            OverviewSort::UsageDesc => "Usage ↓",
        }
    }
}

impl OverviewSort {
    fn compare(self, a: &UsageRow, b: &UsageRow) -> Ordering {
        match self {
            OverviewSort::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            OverviewSort::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            OverviewSort::UsageAsc => a.percentage.total_cmp(&b.percentage),
            OverviewSort::UsageDesc => b.percentage.total_cmp(&a.percentage),
        }
    }
}

/// Sort tag groups, and the subtags inside each group, with the same order.
/// Filtering then keeps any row that matches on its own.
pub fn arrange(mut groups: Vec<TagUsage>, sort: OverviewSort, query: &str) -> Vec<UsageRow> {
    groups.sort_by(|a, b| sort.compare(&a.tag, &b.tag));
    groups
        .into_iter()
        .flat_map(|mut group| {
            group.sub_tags.sort_by(|a, b| sort.compare(a, b));
            std::iter::once(group.tag).chain(group.sub_tags)
        })
        .filter(|row| matches_any(query, &[&row.name, &row.id]))
        .collect()
}

#[derive(Debug)]
pub struct OverviewScene {
    core: SceneCore,
    list: ListState<OverviewSort>,
    periods: PeriodCursor,
    rows: Vec<UsageRow>,
    layout: ListLayout,
}

impl Default for OverviewScene {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewScene {
    pub fn new() -> Self {
        Self {
            core: SceneCore::new(),
            list: ListState::new(OverviewSort::NameAsc),
            periods: PeriodCursor::default(),
            rows: Vec::new(),
            layout: ListLayout::default(),
        }
    }

    pub fn period(&self) -> Option<Period> {
        self.periods.current()
    }

    pub fn rows(&self) -> &[UsageRow] {
        &self.rows
    }

    fn row_line(row: &UsageRow, settings: &Settings) -> Line<'static> {
        let label = if row.is_subtag() {
            format!("  └─ {}", row.name)
        } else {
            row.name.clone()
        };
        let tier = Palette::from(row.tier()).style();
        Line::from(vec![
            Span::raw(format!(
                "{:<24} {:>10} / {:>10} ",
                label,
                row.spent.format_with_symbol(&settings.currency_symbol),
                row.max_amount.format_with_symbol(&settings.currency_symbol),
            )),
            Span::styled(
                format!(
                    "{} {:>6.2}%",
                    progress_bar(row.percentage, settings.progress_bar_width),
                    row.percentage
                ),
                tier,
            ),
        ])
    }
}

impl SceneBehavior for OverviewScene {
    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn handle_input(&mut self, input: Input, _ctx: &mut Context<'_>) {
        match input {
            Input::Esc => self.core.back(),
            Input::Left => {
                self.periods.prev();
                self.list.reset_position();
            }
            Input::Right => {
                self.periods.next();
                self.list.reset_position();
            }
            Input::Mouse {
                column,
                row,
                kind: MouseKind::Click | MouseKind::DoubleClick,
            } => match list_click(&self.layout, column, row) {
                Some(ListClick::Sort(index)) => {
                    self.list.select_sort(index);
                }
                Some(ListClick::Row(offset)) => {
                    self.list.select_visible(offset);
                }
                Some(ListClick::PrevPeriod) => {
                    self.periods.prev();
                    self.list.reset_position();
                }
                Some(ListClick::NextPeriod) => {
                    self.periods.next();
                    self.list.reset_position();
                }
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

        self.rows = match self.periods.current() {
            Some(period) => {
                let report = BudgetOverviewReport::generate(ctx.store, period);
                arrange(report.groups, self.list.sort, &self.list.query())
            }
            None => Vec::new(),
        };
        self.list.clamp(self.rows.len(), self.layout.viewport());
    }

    fn render(&self, frame: &mut Frame, settings: &Settings) {
        render_search_bar(
            frame,
            self.layout.search_bar,
            "Overview",
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
            "No budgets yet. Add one from the Budget screen."
        } else {
            "No matching tags."
        };
        render_rows(frame, self.layout.list, "Usage", &lines, &self.list, empty);

        render_help_bar(
            frame,
            self.layout.help_bar,
            &hint_line(&[KeyContext::List, KeyContext::Periods]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, SubTag, Tag};
    use crate::storage::Store;
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn seeded(temp: &TempDir) -> Store {
        let mut store = Store::open(temp.path().join("budget_data.json")).unwrap();
        store
            .add_budget(
                2024,
                6,
                vec![
                    Tag::new("food", "Food", Money::from_cents(30000)).with_sub_tags(vec![
                        SubTag::new("dining", "Dining", Money::from_cents(10000)),
                        SubTag::new("coffee", "Coffee", Money::from_cents(2000)),
                    ]),
                    Tag::new("bills", "Bills", Money::from_cents(10000)),
                ],
            )
            .unwrap();
        store.add_budget(2024, 5, vec![]).unwrap();
        let mut add = |id: &str, cents, tag: &str, sub: Option<&str>| {
            store
                .add_transaction(NewTransaction {
                    id: id.into(),
                    year: 2024,
                    month: 6,
                    day: 1,
                    amount: Money::from_cents(cents),
                    description: id.into(),
                    tag_id: tag.into(),
                    subtag_id: sub.map(String::from),
                })
                .unwrap();
        };
        add("t1", 4250, "food", None);
        add("t2", 9000, "bills", None);
        add("t3", 1900, "food", Some("coffee"));
        store
    }

    #[test]
    fn test_sorted_groups_keep_subtags_under_parent() {
        let temp = TempDir::new().unwrap();
        let store = seeded(&temp);
        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));

        let names: Vec<String> = arrange(report.groups.clone(), OverviewSort::NameAsc, "")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Bills", "Food", "Coffee", "Dining"]);

        let names: Vec<String> = arrange(report.groups, OverviewSort::UsageDesc, "")
            .into_iter()
            .map(|r| r.name)
            .collect();
        // bills 90%, food 14.17%; coffee 95% before dining 0%
        assert_eq!(names, ["Bills", "Food", "Coffee", "Dining"]);
    }

    #[test]
    fn test_filter_keeps_matching_rows() {
        let temp = TempDir::new().unwrap();
        let store = seeded(&temp);
        let report = BudgetOverviewReport::generate(&store, Period::new(2024, 6));

        let rows = arrange(report.groups, OverviewSort::NameAsc, "din");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].parent_id.as_deref(), Some("food"));
    }

    #[test]
    fn test_period_navigation() {
        let temp = TempDir::new().unwrap();
        let mut store = seeded(&temp);
        let settings = Settings::default();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 100, 30),
        };

        let mut scene = OverviewScene::new();
        scene.update(&mut ctx);
        assert_eq!(scene.period(), Some(Period::new(2024, 6)));
        assert_eq!(scene.rows().len(), 4);

        scene.handle_input(Input::Left, &mut ctx);
        scene.update(&mut ctx);
        assert_eq!(scene.period(), Some(Period::new(2024, 5)));
        assert!(scene.rows().is_empty());

        scene.handle_input(Input::Left, &mut ctx);
        scene.update(&mut ctx);
        assert_eq!(scene.period(), Some(Period::new(2024, 6)));
    }
}
