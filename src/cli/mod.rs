//! CLI command handlers
//!
//! Non-interactive views over the store, bridging clap argument parsing
//! with the display layer.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::handle_budgets_command;
pub use report::{handle_overview_command, OverviewArgs};
pub use transaction::{handle_transactions_command, TransactionsArgs};
