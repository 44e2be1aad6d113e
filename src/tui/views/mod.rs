//! TUI Views module
//!
//! The full-screen scenes: the root menu, the three list scenes and help.

pub mod budget;
pub mod help;
pub mod main_menu;
pub mod overview;
pub mod transactions;

pub use budget::BudgetScene;
pub use help::HelpScene;
pub use main_menu::MainMenu;
pub use overview::OverviewScene;
pub use transactions::TransactionsScene;

use super::layout::{contains, ListLayout};

/// What a click in a list scene landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListClick {
    Sort(usize),
    /// Offset below the top of the visible window
    Row(usize),
    PrevPeriod,
    NextPeriod,
}

fn list_click(layout: &ListLayout, column: u16, row: u16) -> Option<ListClick> {
    if let Some(index) = layout.sort_option_at(column, row) {
        return Some(ListClick::Sort(index));
    }
    if let Some(offset) = layout.row_at(column, row) {
        return Some(ListClick::Row(offset));
    }
    if contains(layout.period_prev(), column, row) {
        return Some(ListClick::PrevPeriod);
    }
    if contains(layout.period_next(), column, row) {
        return Some(ListClick::NextPeriod);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_list_click_regions() {
        let layout = ListLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(list_click(&layout, 2, 5), Some(ListClick::Sort(0)));
        assert_eq!(list_click(&layout, 40, 6), Some(ListClick::Row(1)));
        assert_eq!(list_click(&layout, 2, 2), Some(ListClick::PrevPeriod));
        assert_eq!(list_click(&layout, 14, 2), Some(ListClick::NextPeriod));
        assert_eq!(list_click(&layout, 40, 1), None);
    }
}
