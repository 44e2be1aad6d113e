//! Path management for Finman
//!
//! ## Path Resolution Order
//!
//! 1. `FINMAN_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories::ProjectDirs`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinmanError;

/// Manages all paths used by Finman
#[derive(Debug, Clone)]
pub struct FinmanPaths {
    /// Base directory for all Finman data
    base_dir: PathBuf,
}

impl FinmanPaths {
    /// Create a new FinmanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinmanError> {
        let base_dir = if let Ok(custom) = std::env::var("FINMAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FinmanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the budgets/transactions document
    pub fn data_file(&self) -> PathBuf {
        self.base_dir.join("budget_data.json")
    }

    /// Get the path to the tracing log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("finman.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), FinmanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinmanError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, FinmanError> {
    ProjectDirs::from("", "", "finman")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FinmanError::Config("Could not determine a home directory".into()))
}
