//! Finman - Terminal-based monthly budgeting and transaction tracker
//!
//! This library provides the core functionality for Finman. Budgets are keyed
//! by calendar month and hold spending limits per tag and subtag; transactions
//! are attributed to a tag (and optionally a subtag) and compared against those
//! limits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory, user settings and log setup
//! - `error`: Custom error types
//! - `models`: Budgets, tags, subtags, transactions, money and periods
//! - `storage`: The JSON document store
//! - `reports`: Budget usage derived from the store
//! - `cli` / `display`: Non-interactive commands and their tables
//! - `tui`: The interactive interface
//!
//! # Example
//!
//! ```rust,ignore
//! use finman::config::{FinmanPaths, Settings};
//! use finman::storage::Store;
//!
//! let paths = FinmanPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = Store::open(paths.data_file())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;
pub mod tui;

pub use error::FinmanError;
