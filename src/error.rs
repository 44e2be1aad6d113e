//! Custom error types for Finman
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Finman operations
#[derive(Error, Debug)]
pub enum FinmanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed or out-of-range user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate key errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl FinmanError {
    /// Create a "not found" error for a budget period
    pub fn budget_not_found(year: i32, month: u32) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: format!("{:04}-{:02}", year, month),
        }
    }

    /// Create a "not found" error for tags
    pub fn tag_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tag",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for subtags
    pub fn subtag_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Subtag",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a duplicate-key error
    pub fn duplicate(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate-key error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinmanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinmanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Finman operations
pub type FinmanResult<T> = Result<T, FinmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinmanError::Config("bad tick rate".into());
        assert_eq!(err.to_string(), "Configuration error: bad tick rate");

        let err = FinmanError::budget_not_found(2024, 6);
        assert_eq!(err.to_string(), "Budget not found: 2024-06");

        let err = FinmanError::duplicate("Tag", "food");
        assert_eq!(err.to_string(), "Tag already exists: food");
    }

    #[test]
    fn test_error_predicates() {
        assert!(FinmanError::tag_not_found("food").is_not_found());
        assert!(FinmanError::duplicate("Transaction", "txn_001").is_duplicate());
        assert!(FinmanError::Validation("Month must be 1-12".into()).is_validation());
        assert!(!FinmanError::Storage("disk".into()).is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FinmanError = io_err.into();
        assert!(matches!(err, FinmanError::Io(_)));
    }
}
