//! Reusable widgets for the TUI
//!
//! Building blocks shared by several scenes

pub mod error_dialog;
pub mod input;
pub mod list;

pub use error_dialog::ErrorInfo;
pub use input::TextInput;
pub use list::{ListState, PeriodCursor, SortMode};
