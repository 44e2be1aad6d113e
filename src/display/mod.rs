//! Display formatting for terminal output
//!
//! Plain tables for the non-interactive commands.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_budget_list;
pub use report::{format_overview, format_percentage};
pub use transaction::format_transaction_table;
