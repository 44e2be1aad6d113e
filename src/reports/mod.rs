//! Reports module for Finman
//!
//! Derived views over the store that both the TUI and the CLI render.

pub mod budget_overview;

pub use budget_overview::{
    progress_bar, usage_percentage, BudgetOverviewReport, TagUsage, UsageRow, UsageTier,
};
