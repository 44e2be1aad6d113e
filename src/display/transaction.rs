//! Transaction display formatting
//!
//! Renders transactions as a plain table for the `transactions` command.

use tabled::{settings::Style, Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency_symbol: &str) -> Self {
        Self {
            id: txn.id.clone(),
            date: txn.date_string(),
            amount: txn.amount.format_with_symbol(currency_symbol),
            tag: txn.tag_path(),
            description: txn.description.clone(),
        }
    }
}

/// Format transactions as a table, oldest first
pub fn format_transaction_table(transactions: &[&Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|t| (t.year, t.month, t.day));

    let rows = sorted
        .into_iter()
        .map(|t| TransactionRow::new(t, currency_symbol));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n{} transaction(s)\n", table, transactions.len())
}
