//! Searchable, sortable, scrollable list state and its chrome
//!
//! [`ListState`] is the view model the list scenes keep across frames.
//! The `render_*` helpers draw the regions computed by
//! [`ListLayout`](crate::tui::layout::ListLayout).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::input::TextInput;
use crate::models::Period;
use crate::tui::event::{Input, MouseKind};
use crate::tui::palette::Palette;

/// A closed set of sort orders cycled with Tab / Shift+Tab
pub trait SortMode: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Selection, scroll, search and sort of one list scene
#[derive(Debug, Clone)]
pub struct ListState<S: SortMode> {
    pub search: TextInput,
    pub sort: S,
    pub selected: usize,
    pub scroll: usize,
    len: usize,
    viewport: usize,
}

impl<S: SortMode> ListState<S> {
    pub fn new(sort: S) -> Self {
        Self {
            search: TextInput::new().placeholder("type to filter"),
            sort,
            selected: 0,
            scroll: 0,
            len: 0,
            viewport: 0,
        }
    }

    /// Lowercased search text
    pub fn query(&self) -> String {
        self.search.value().trim().to_lowercase()
    }

    /// Keep selection inside `[0, len-1]` and the selection inside the window
    pub fn clamp(&mut self, len: usize, viewport: usize) {
        self.len = len;
        self.viewport = viewport;

        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };

        if viewport == 0 {
            self.scroll = self.selected;
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + viewport {
            self.scroll = self.selected + 1 - viewport;
        }
        self.scroll = self.scroll.min(len.saturating_sub(viewport));
    }

    /// Rows currently visible, as a range into the filtered list
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.scroll + self.viewport.max(1)).min(self.len);
        self.scroll.min(end)..end
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            self.selected = 0;
            return;
        }
        let max = self.len as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    fn page(&self) -> isize {
        self.viewport.max(1) as isize
    }

    /// Select the row at `offset` below the top of the window
    pub fn select_visible(&mut self, offset: usize) -> bool {
        let index = self.scroll + offset;
        if index < self.len {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Navigation, sort cycling and search editing shared by all list scenes.
    /// Returns false when the input is left for the scene.
    pub fn handle_common(&mut self, input: Input) -> bool {
        match input {
            Input::Up => self.move_by(-1),
            Input::Down => self.move_by(1),
            Input::PageUp => self.move_by(-self.page()),
            Input::PageDown => self.move_by(self.page()),
            Input::Home => self.selected = 0,
            Input::End => self.selected = self.len.saturating_sub(1),
            Input::Tab => self.sort = self.sort.next(),
            Input::BackTab => self.sort = self.sort.prev(),
            Input::Char(c) => {
                self.search.move_end();
                self.search.insert(c);
                self.reset_position();
            }
            Input::Backspace => {
                self.search.move_end();
                self.search.backspace();
                self.reset_position();
            }
            Input::Mouse {
                kind: MouseKind::ScrollUp,
                ..
            } => self.move_by(-3),
            Input::Mouse {
                kind: MouseKind::ScrollDown,
                ..
            } => self.move_by(3),
            _ => return false,
        }
        true
    }

    /// Back to the first row, e.g. after the filter or period changed
    pub fn reset_position(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    /// Pick a sort mode by its row in the sort panel
    pub fn select_sort(&mut self, index: usize) -> bool {
        match S::ALL.get(index) {
            Some(mode) => {
                self.sort = *mode;
                true
            }
            None => false,
        }
    }
}

/// Cursor over the sorted distinct periods that have budgets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodCursor {
    periods: Vec<Period>,
    index: usize,
}

impl PeriodCursor {
    /// Replace the period list, staying on the same period when it still exists.
    /// A fresh cursor starts on the current month if budgeted, else the latest.
    pub fn refresh(&mut self, periods: Vec<Period>) {
        let target = self.current().or_else(|| {
            let today = Period::current();
            Some(if periods.contains(&today) {
                today
            } else {
                periods.last().copied().unwrap_or(today)
            })
        });

        self.index = match target.and_then(|p| periods.iter().position(|q| *q == p)) {
            Some(index) => index,
            None => self.index.min(periods.len().saturating_sub(1)),
        };
        self.periods = periods;
    }

    pub fn current(&self) -> Option<Period> {
        self.periods.get(self.index).copied()
    }

    /// Move forward, wrapping to the first period
    pub fn next(&mut self) {
        if !self.periods.is_empty() {
            self.index = (self.index + 1) % self.periods.len();
        }
    }

    /// Move back, wrapping to the last period
    pub fn prev(&mut self) {
        if !self.periods.is_empty() {
            self.index = (self.index + self.periods.len() - 1) % self.periods.len();
        }
    }
}

/// Case-insensitive substring match against any of `fields`
pub fn matches_any(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(query))
}

/// Search text on the first line, period and sort on the second
pub fn render_search_bar<S: SortMode>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    state: &ListState<S>,
    period: Option<Option<Period>>,
) {
    let mut search_line = vec![Span::styled("Search: ", Palette::Title.style())];
    search_line.extend(state.search.spans(true));

    let mut status = Vec::new();
    if let Some(period) = period {
        let label = period
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-------".to_string());
        status.push(Span::styled("[<]", Palette::Title.style()));
        status.push(Span::raw(format!(" {} ", label)));
        status.push(Span::styled("[>]", Palette::Title.style()));
        status.push(Span::raw("  "));
    }
    status.push(Span::styled("Sort: ", Palette::Muted.style()));
    status.push(Span::raw(state.sort.label()));

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Palette::Title.style())
        .borders(Borders::ALL);

    frame.render_widget(
        Paragraph::new(vec![Line::from(search_line), Line::from(status)]).block(block),
        area,
    );
}

/// One row per sort mode, the active one highlighted
pub fn render_sort_panel<S: SortMode>(frame: &mut Frame, area: Rect, active: S) {
    let lines: Vec<Line> = S::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                Line::from(Span::styled(
                    format!("> {}", mode.label()),
                    Palette::Selection.style(),
                ))
            } else {
                Line::from(format!("  {}", mode.label()))
            }
        })
        .collect();

    let block = Block::default().title(" Sort ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The visible window of `rows`, with the selected row highlighted
pub fn render_rows<S: SortMode>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[Line<'static>],
    state: &ListState<S>,
    empty_message: &str,
) {
    let block = Block::default()
        .title(format!(" {} ({}) ", title, rows.len()))
        .borders(Borders::ALL)
        .border_style(Palette::Title.style());

    if rows.is_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            empty_message.to_string(),
            Palette::Muted.style(),
        )))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    let window = state.visible();
    let lines: Vec<Line> = rows[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            if window.start + offset == state.selected {
                line.clone().patch_style(Palette::Selection.style())
            } else {
                line.clone()
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Single-line key hints
pub fn render_help_bar(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
        area,
    );
}
