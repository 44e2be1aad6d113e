//! Transaction operations on the [`Store`]

use tracing::info;

use super::Store;
use crate::error::{FinmanError, FinmanResult};
use crate::models::{Money, NewTransaction, Transaction};

/// Partial update of a transaction; `None` fields are left as they are.
///
/// `subtag_id: Some(None)` clears the subtag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub tag_id: Option<String>,
    pub subtag_id: Option<Option<String>>,
}

impl Store {
    pub fn add_transaction(&mut self, new: NewTransaction) -> FinmanResult<()> {
        let id = new.id.clone();
        self.mutate(|doc| {
            if doc.find_transaction(&new.id).is_some() {
                return Err(FinmanError::duplicate("Transaction", new.id));
            }
            doc.transactions.push(Transaction::from(new));
            Ok(true)
        })?;
        info!(id = %id, "Added transaction");
        Ok(())
    }

    /// Remove a transaction; a missing id is a no-op
    pub fn remove_transaction(&mut self, id: &str) -> FinmanResult<()> {
        let removed = self.mutate(|doc| {
            let before = doc.transactions.len();
            doc.transactions.retain(|t| t.id != id);
            Ok(doc.transactions.len() != before)
        })?;
        if removed {
            info!(id, "Removed transaction");
        }
        Ok(())
    }

    pub fn edit_transaction(&mut self, id: &str, patch: TransactionPatch) -> FinmanResult<()> {
        self.mutate(|doc| {
            let txn = doc
                .find_transaction_mut(id)
                .ok_or_else(|| FinmanError::transaction_not_found(id))?;
            if let Some(year) = patch.year {
                txn.year = year;
            }
            if let Some(month) = patch.month {
                txn.month = month;
            }
            if let Some(day) = patch.day {
                txn.day = day;
            }
            if let Some(amount) = patch.amount {
                txn.amount = amount;
            }
            if let Some(description) = patch.description {
                txn.description = description;
            }
            if let Some(tag_id) = patch.tag_id {
                txn.tag_id = tag_id;
            }
            if let Some(subtag_id) = patch.subtag_id {
                txn.subtag_id = subtag_id;
            }
            Ok(true)
        })?;
        info!(id, "Edited transaction");
        Ok(())
    }

    pub fn get_transaction(&self, id: &str) -> Option<&Transaction> {
        self.doc.find_transaction(id)
    }

    pub fn get_all_transactions(&self) -> &[Transaction] {
        &self.doc.transactions
    }

    /// Transactions of a year, optionally narrowed to a month and then a day
    pub fn get_transactions_by_date(
        &self,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Vec<&Transaction> {
        self.doc
            .transactions
            .iter()
            .filter(|t| t.year == year)
            .filter(|t| month.map_or(true, |m| t.month == m))
            .filter(|t| day.map_or(true, |d| t.day == d))
            .collect()
    }

    /// Transactions with `tag_id`; with a subtag given, only exact matches
    pub fn get_transactions_by_tag(
        &self,
        tag_id: &str,
        subtag_id: Option<&str>,
    ) -> Vec<&Transaction> {
        self.doc
            .transactions
            .iter()
            .filter(|t| t.matches_tag(tag_id, subtag_id))
            .collect()
    }

    /// First unused id of the form `txn_001`
    pub fn next_transaction_id(&self) -> String {
        (1..)
            .map(|n| format!("txn_{:03}", n))
            .find(|id| self.doc.find_transaction(id).is_none())
            .unwrap_or_default()
    }
}
