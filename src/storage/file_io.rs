//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinmanError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, FinmanError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FinmanError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FinmanError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write pretty-printed JSON atomically (write to temp, then rename)
///
/// The target is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinmanError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FinmanError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinmanError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinmanError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinmanError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinmanError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinmanError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Document};
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget_data.json");

        let doc: Document = read_json(&path).unwrap();
        assert!(doc.budgets.is_empty());
        assert!(doc.transactions.is_empty());
    }

    #[test]
    fn test_write_uses_two_space_indent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget_data.json");

        let doc = Document {
            budgets: vec![Budget::new(2024, 6, vec![])],
            transactions: vec![],
        };
        write_json_atomic(&path, &doc).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"budgets\": ["));
        assert!(!temp_dir.path().join("budget_data.json.tmp").exists());
    }

    #[test]
    fn test_invalid_json_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget_data.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Document, _>(&path).unwrap_err();
        assert!(matches!(err, FinmanError::Storage(_)));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("budget_data.json");

        write_json_atomic(&path, &Document::default()).unwrap();
        let loaded: Document = read_json(&path).unwrap();
        assert_eq!(loaded, Document::default());
    }
}
