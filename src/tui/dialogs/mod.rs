//! Modal scenes for the TUI
//!
//! The generic [`Dialog`] and the two editors. All of them are drawn over the
//! scene that opened them.

pub mod budget_editor;
pub mod dialog;
pub mod form;
pub mod transaction_editor;

pub use budget_editor::{BudgetEditor, BudgetTarget};
pub use dialog::Dialog;
pub use form::Mode;
pub use transaction_editor::TransactionEditor;
