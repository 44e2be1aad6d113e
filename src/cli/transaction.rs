//! Transaction CLI commands

use clap::Args;

use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::FinmanResult;
use crate::models::Transaction;
use crate::storage::Store;

/// Filters for the `transactions` command
#[derive(Args, Debug, Default)]
pub struct TransactionsArgs {
    /// Only this tag, or `tag/subtag` for one subtag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only transactions dated in this year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Only transactions dated in this month (requires --year)
    #[arg(short, long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

/// Transactions selected by `args`, in document order
pub fn select_transactions<'a>(store: &'a Store, args: &TransactionsArgs) -> Vec<&'a Transaction> {
    let mut selected: Vec<&Transaction> = match args.year {
        Some(year) => store.get_transactions_by_date(year, args.month, None),
        None => store.get_all_transactions().iter().collect(),
    };

    if let Some(path) = args.tag.as_deref() {
        let (tag, subtag) = match path.split_once('/') {
            Some((tag, subtag)) => (tag, Some(subtag)),
            None => (path, None),
        };
        selected.retain(|t| t.matches_tag(tag, subtag));
    }

    selected
}

/// Handle the `transactions` command
pub fn handle_transactions_command(
    store: &Store,
    settings: &Settings,
    args: TransactionsArgs,
) -> FinmanResult<()> {
    let selected = select_transactions(store, &args);
    print!(
        "{}",
        format_transaction_table(&selected, &settings.currency_symbol)
    );
    Ok(())
}
