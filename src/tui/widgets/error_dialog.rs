//! Error presentation
//!
//! Turns a [`FinmanError`] into the title, details and recovery hint shown by
//! the error dialog.

use crate::error::FinmanError;

/// What an error dialog says about a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// The error title/summary
    pub title: String,
    /// Detailed error message
    pub details: String,
    /// Suggested recovery action
    pub suggestion: Option<String>,
}

impl ErrorInfo {
    /// Create error info from a FinmanError
    pub fn from_error(error: &FinmanError) -> Self {
        let (title, details, suggestion) = match error {
            FinmanError::Config(msg) => (
                "Configuration Error".to_string(),
                msg.clone(),
                Some("Check config.json for syntax errors".to_string()),
            ),
            FinmanError::Io(msg) => (
                "I/O Error".to_string(),
                msg.clone(),
                Some("Check permissions on the data directory".to_string()),
            ),
            FinmanError::Json(msg) => (
                "Data File Error".to_string(),
                format!("Failed to read or write data: {}", msg),
                Some("The data file may be corrupted".to_string()),
            ),
            FinmanError::Validation(msg) => (
                "Invalid Input".to_string(),
                msg.clone(),
                Some("Review the values and try again".to_string()),
            ),
            FinmanError::NotFound {
                entity_type,
                identifier,
            } => (
                format!("{} Not Found", entity_type),
                format!(
                    "Could not find {} '{}'",
                    entity_type.to_lowercase(),
                    identifier
                ),
                match *entity_type {
                    "Tag" => Some("Create the parent tag for this period first".to_string()),
                    _ => None,
                },
            ),
            FinmanError::Duplicate {
                entity_type,
                identifier,
            } => (
                format!("Duplicate {}", entity_type),
                format!("{} '{}' already exists", entity_type, identifier),
                Some(format!(
                    "Use a different id or edit the existing {}",
                    entity_type.to_lowercase()
                )),
            ),
            FinmanError::Storage(msg) => (
                "Storage Error".to_string(),
                msg.clone(),
                Some("Check that the data directory is accessible".to_string()),
            ),
            FinmanError::Tui(msg) => (
                "Interface Error".to_string(),
                msg.clone(),
                Some("Try resizing your terminal window".to_string()),
            ),
        };

        Self {
            title,
            details,
            suggestion,
        }
    }

    /// Dialog body: details, then the hint on its own line
    pub fn message(&self) -> String {
        match &self.suggestion {
            Some(hint) => format!("{}\n{}", self.details, hint),
            None => self.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_info() {
        let info = ErrorInfo::from_error(&FinmanError::Validation("Month must be 1-12".into()));
        assert_eq!(info.title, "Invalid Input");
        assert!(info.message().starts_with("Month must be 1-12\n"));
    }

    #[test]
    fn test_duplicate_info() {
        let info = ErrorInfo::from_error(&FinmanError::duplicate("Tag", "food"));
        assert_eq!(info.title, "Duplicate Tag");
        assert_eq!(info.details, "Tag 'food' already exists");
    }

    #[test]
    fn test_not_found_without_hint() {
        let info = ErrorInfo::from_error(&FinmanError::transaction_not_found("txn_009"));
        assert_eq!(info.message(), "Could not find transaction 'txn_009'");
    }
}
