//! Root aggregate persisted to `budget_data.json`

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::transaction::Transaction;

/// Every budget and transaction, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Document {
    pub fn find_budget(&self, year: i32, month: u32) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.year == year && b.month == month)
    }

    pub fn find_budget_mut(&mut self, year: i32, month: u32) -> Option<&mut Budget> {
        self.budgets
            .iter_mut()
            .find(|b| b.year == year && b.month == month)
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn find_transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }
}
