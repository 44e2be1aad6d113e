//! Core data models for Finman
//!
//! Budgets keyed by month, their tags and subtags, and the transactions that
//! are attributed to them.

pub mod budget;
pub mod document;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, SubTag, Tag};
pub use document::Document;
pub use money::{Money, MoneyParseError};
pub use period::Period;
pub use transaction::{NewTransaction, Transaction};
