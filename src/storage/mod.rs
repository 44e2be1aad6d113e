//! Storage layer for Finman
//!
//! [`Store`] owns the single budgets/transactions [`Document`]. It is loaded
//! once and rewritten in full after every successful mutation.

pub mod budgets;
pub mod file_io;
pub mod transactions;

pub use budgets::{SubTagPatch, TagChoice, TagPatch};
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionPatch;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::FinmanResult;
use crate::models::Document;

/// The persisted document together with the file it lives in
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    doc: Document,
}

impl Store {
    /// Load the document at `path`, starting empty when the file is absent
    pub fn open(path: impl Into<PathBuf>) -> FinmanResult<Self> {
        let path = path.into();
        let doc: Document = read_json(&path)?;
        debug!(
            path = %path.display(),
            budgets = doc.budgets.len(),
            transactions = doc.transactions.len(),
            "Loaded document"
        );
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Apply `change` to a working copy; persist and swap it in only if the
    /// closure reports a modification. On error the live document is untouched.
    ///
    /// Returns whether the document was written.
    fn mutate<F>(&mut self, change: F) -> FinmanResult<bool>
    where
        F: FnOnce(&mut Document) -> FinmanResult<bool>,
    {
        let mut working = self.doc.clone();
        if !change(&mut working)? {
            return Ok(false);
        }

        write_json_atomic(&self.path, &working)?;
        debug!(path = %self.path.display(), "Saved document");
        self.doc = working;
        Ok(true)
    }
}
