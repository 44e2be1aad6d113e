//! Configuration module for Finman
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - Log file setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::FinmanPaths;
pub use settings::Settings;
