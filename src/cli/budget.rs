//! Budget CLI commands

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::FinmanResult;
use crate::storage::Store;

/// Handle the `budgets` command
pub fn handle_budgets_command(store: &Store, settings: &Settings) -> FinmanResult<()> {
    print!(
        "{}",
        format_budget_list(store.get_all_budgets(), &settings.currency_symbol)
    );
    Ok(())
}
