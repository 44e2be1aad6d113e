//! Terminal User Interface module
//!
//! A stack of scenes driven by the [`Controller`]: the main menu, the
//! Transactions, Budget and Overview lists, a help screen, and the modal
//! editors and dialogs drawn over them.

pub mod controller;
pub mod event;
pub mod scene;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;
pub mod palette;

// Keybindings
pub mod keybindings;

pub use controller::Controller;
pub use terminal::run_tui;
