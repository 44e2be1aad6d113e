//! Layout definitions for the TUI
//!
//! Geometry is recomputed from the terminal area on every frame; nothing here
//! holds state between frames.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the sort panel on the left of the list scenes
pub const SORT_PANEL_WIDTH: u16 = 20;

/// Regions shared by the Transactions, Budget and Overview scenes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLayout {
    /// Search and period header
    pub search_bar: Rect,
    /// Sort mode picker
    pub sort_panel: Rect,
    /// Scrollable rows
    pub list: Rect,
    /// Key hints at the bottom
    pub help_bar: Rect,
}

impl ListLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Search bar
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SORT_PANEL_WIDTH),
                Constraint::Min(10),
            ])
            .split(vertical[1]);

        Self {
            search_bar: vertical[0],
            sort_panel: horizontal[0],
            list: horizontal[1],
            help_bar: vertical[2],
        }
    }

    /// Number of rows that fit inside the bordered list
    pub fn viewport(&self) -> usize {
        self.list.height.saturating_sub(2) as usize
    }

    /// Row index (relative to the scroll offset) under a click in the list
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = inner(self.list);
        contains(inner, column, row).then(|| (row - inner.y) as usize)
    }

    /// Sort option index under a click in the sort panel
    pub fn sort_option_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = inner(self.sort_panel);
        contains(inner, column, row).then(|| (row - inner.y) as usize)
    }

    /// `[<]` hit box on the period line of the search bar
    pub fn period_prev(&self) -> Rect {
        let inner = inner(self.search_bar);
        Rect::new(inner.x, inner.y + 1, 3, 1).intersection(inner)
    }

    /// `[>]` hit box on the period line of the search bar
    pub fn period_next(&self) -> Rect {
        let inner = inner(self.search_bar);
        Rect::new(inner.x + 12, inner.y + 1, 3, 1).intersection(inner)
    }
}

/// Area inside a one-cell border
pub fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Whether a terminal cell lies inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Editor popup: up to 60x20, leaving a two-cell margin on small terminals
pub fn form_area(r: Rect) -> Rect {
    let width = 60.min(r.width.saturating_sub(4));
    let height = 20.min(r.height.saturating_sub(4));
    centered_rect_fixed(width, height, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_layout_regions() {
        let layout = ListLayout::new(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.search_bar, Rect::new(0, 0, 80, 4));
        assert_eq!(layout.sort_panel, Rect::new(0, 4, SORT_PANEL_WIDTH, 19));
        assert_eq!(layout.list, Rect::new(SORT_PANEL_WIDTH, 4, 60, 19));
        assert_eq!(layout.help_bar, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.viewport(), 17);
    }

    #[test]
    fn test_hit_testing() {
        let layout = ListLayout::new(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.row_at(30, 5), Some(0));
        assert_eq!(layout.row_at(30, 7), Some(2));
        assert_eq!(layout.row_at(30, 4), None); // border
        assert_eq!(layout.sort_option_at(2, 6), Some(1));
        assert_eq!(layout.sort_option_at(30, 6), None);
        assert!(contains(layout.period_prev(), 1, 2));
        assert!(contains(layout.period_next(), 13, 2));
    }

    #[test]
    fn test_form_area_shrinks_on_small_terminal() {
        let area = form_area(Rect::new(0, 0, 40, 12));
        assert_eq!(area.width, 36);
        assert_eq!(area.height, 8);

        let area = form_area(Rect::new(0, 0, 120, 40));
        assert_eq!(area, Rect::new(30, 10, 60, 20));
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = centered_rect_fixed(100, 10, Rect::new(0, 0, 50, 20));
        assert_eq!(area.width, 50);
        assert_eq!(area.y, 5);
    }
}
