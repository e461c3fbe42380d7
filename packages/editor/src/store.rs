//! Persistence boundary.
//!
//! The core only needs load and save over the document snapshot; the
//! collaborator behind the trait owns transport, debouncing, and
//! timestamps. The import/export format is the document serialized
//! verbatim: a JSON array of page sections.

use pagecraft_common::CommonResult;
use pagecraft_document::model::PageSection;
use std::cell::RefCell;
use std::path::PathBuf;

/// Persistence collaborator for document snapshots
pub trait DocumentStore {
    /// Fetch the persisted document, if one exists
    fn load(&self) -> CommonResult<Option<Vec<PageSection>>>;

    /// Persist a snapshot, fire-and-forget
    fn save(&self, sections: &[PageSection]) -> CommonResult<()>;
}

/// JSON file on disk
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> CommonResult<Option<Vec<PageSection>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, sections: &[PageSection]) -> CommonResult<()> {
        let json = export_json(sections)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("saved document to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Vec<PageSection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(sections: Vec<PageSection>) -> Self {
        Self {
            saved: RefCell::new(Some(sections)),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> CommonResult<Option<Vec<PageSection>>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, sections: &[PageSection]) -> CommonResult<()> {
        *self.saved.borrow_mut() = Some(sections.to_vec());
        Ok(())
    }
}

/// Serialize a document to the export format
pub fn export_json(sections: &[PageSection]) -> CommonResult<String> {
    Ok(serde_json::to_string_pretty(sections)?)
}

/// Parse a document from the export format
pub fn import_json(raw: &str) -> CommonResult<Vec<PageSection>> {
    Ok(serde_json::from_str(raw)?)
}
