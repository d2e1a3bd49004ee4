//! In-memory document backend
//!
//! The reference [`DocumentBackend`] implementation: a store of named
//! documents with exclusive-open semantics. Opening hands out a working
//! copy; closing with save writes it back, closing without save (or
//! dropping the handle) discards it. Used by the test suite and as the
//! model for automation backends.

use crate::backend::{DocumentBackend, DocumentHandle};
use ahash::{AHashMap, AHashSet};
use pricebook_core::{CellRef, CellValue, Error, Result, SheetRead, SheetWrite};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One sheet of an in-memory document. Sparse cell storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    name: String,
    cells: AHashMap<(u32, u32), CellValue>,
    max_row: u32,
    max_col: u32,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set a cell by A1 reference. Fixture convenience.
    pub fn set(&mut self, reference: &str, value: impl Into<CellValue>) -> Result<()> {
        let cell = CellRef::parse(reference)?;
        self.write_cell(cell, value.into())
    }

    /// Read a cell by A1 reference. Fixture convenience.
    pub fn get(&self, reference: &str) -> Result<CellValue> {
        let cell = CellRef::parse(reference)?;
        self.read_cell(cell)
    }
}

impl SheetRead for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_cell(&self, cell: CellRef) -> Result<CellValue> {
        Ok(self
            .cells
            .get(&(cell.row, cell.col))
            .cloned()
            .unwrap_or(CellValue::Empty))
    }

    fn used_range(&self) -> (u32, u32) {
        (self.max_row, self.max_col)
    }
}

impl SheetWrite for MemorySheet {
    fn write_cell(&mut self, cell: CellRef, value: CellValue) -> Result<()> {
        if value.is_empty() {
            self.cells.remove(&(cell.row, cell.col));
        } else {
            self.max_row = self.max_row.max(cell.row);
            self.max_col = self.max_col.max(cell.col);
            self.cells.insert((cell.row, cell.col), value);
        }
        Ok(())
    }
}

/// An in-memory document: an ordered list of named sheets.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    sheets: Vec<MemorySheet>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet and return it for population.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> &mut MemorySheet {
        self.sheets.push(MemorySheet::new(name));
        self.sheets.last_mut().expect("just pushed")
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut MemorySheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }
}

#[derive(Debug, Default)]
struct Store {
    docs: AHashMap<PathBuf, MemoryDocument>,
    open: AHashSet<PathBuf>,
}

/// In-memory backend with exclusive-open semantics.
///
/// Cloning shares the underlying store. The backend is single-threaded,
/// matching the engine's execution model.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    store: Rc<RefCell<Store>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a path.
    pub fn insert(&self, path: impl Into<PathBuf>, doc: MemoryDocument) {
        self.store.borrow_mut().docs.insert(path.into(), doc);
    }

    /// Snapshot a stored document (its last saved state).
    pub fn document(&self, path: &Path) -> Option<MemoryDocument> {
        self.store.borrow().docs.get(path).cloned()
    }

    /// Whether a handle currently holds the document.
    pub fn is_open(&self, path: &Path) -> bool {
        self.store.borrow().open.contains(path)
    }

    /// Force the open flag on, simulating the document being held by
    /// another application instance.
    pub fn hold_open(&self, path: impl Into<PathBuf>) {
        self.store.borrow_mut().open.insert(path.into());
    }

    /// Release a forced hold.
    pub fn release(&self, path: &Path) {
        self.store.borrow_mut().open.remove(path);
    }
}

impl DocumentBackend for MemoryBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentHandle>> {
        let mut store = self.store.borrow_mut();
        let doc = store
            .docs
            .get(path)
            .cloned()
            .ok_or_else(|| Error::DocumentAccess(format!("document not found: {}", path.display())))?;
        if !store.open.insert(path.to_path_buf()) {
            return Err(Error::DocumentAccess(format!(
                "document already open: {}",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "opened document");
        Ok(Box::new(MemoryHandle {
            store: Rc::clone(&self.store),
            path: path.to_path_buf(),
            doc,
            closed: false,
        }))
    }
}

/// Exclusive handle over a working copy of a stored document.
pub struct MemoryHandle {
    store: Rc<RefCell<Store>>,
    path: PathBuf,
    doc: MemoryDocument,
    closed: bool,
}

impl DocumentHandle for MemoryHandle {
    fn sheet_names(&self) -> Vec<String> {
        self.doc.sheet_names()
    }

    fn sheet(&mut self, name: &str) -> Result<&mut dyn SheetWrite> {
        match self.doc.sheet_mut(name) {
            Some(sheet) => Ok(sheet),
            None => Err(Error::SheetNotFound(name.to_string())),
        }
    }

    fn close(mut self: Box<Self>, save: bool) -> Result<()> {
        let mut store = self.store.borrow_mut();
        if save {
            tracing::debug!(path = %self.path.display(), "saving document");
            store.docs.insert(self.path.clone(), self.doc.clone());
        }
        store.open.remove(&self.path);
        self.closed = true;
        Ok(())
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        // A dropped handle releases the document without saving
        if !self.closed {
            self.store.borrow_mut().open.remove(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backend_with_doc(path: &str) -> MemoryBackend {
        let backend = MemoryBackend::new();
        let mut doc = MemoryDocument::new();
        doc.add_sheet("Pricing Setup").set("E2", "Client Name:").unwrap();
        backend.insert(path, doc);
        backend
    }

    #[test]
    fn test_open_missing_document_fails() {
        let backend = MemoryBackend::new();
        assert!(backend.open(Path::new("missing.xlsb")).is_err());
    }

    #[test]
    fn test_exclusive_open() {
        let backend = backend_with_doc("doc.xlsb");
        let handle = backend.open(Path::new("doc.xlsb")).unwrap();
        assert!(backend.open(Path::new("doc.xlsb")).is_err());
        handle.close(false).unwrap();
        assert!(backend.open(Path::new("doc.xlsb")).is_ok());
    }

    #[test]
    fn test_close_with_save_persists_writes() {
        let backend = backend_with_doc("doc.xlsb");
        let mut handle = backend.open(Path::new("doc.xlsb")).unwrap();
        let sheet = handle.sheet("Pricing Setup").unwrap();
        sheet.write_cell(CellRef::parse("F2").unwrap(), "Acme Corp".into()).unwrap();
        handle.close(true).unwrap();

        let doc = backend.document(Path::new("doc.xlsb")).unwrap();
        let value = doc.sheet("Pricing Setup").unwrap().get("F2").unwrap();
        assert_eq!(value, CellValue::Text("Acme Corp".into()));
    }

    #[test]
    fn test_close_without_save_discards_writes() {
        let backend = backend_with_doc("doc.xlsb");
        let mut handle = backend.open(Path::new("doc.xlsb")).unwrap();
        handle
            .sheet("Pricing Setup")
            .unwrap()
            .write_cell(CellRef::parse("F2").unwrap(), "Acme Corp".into())
            .unwrap();
        handle.close(false).unwrap();

        let doc = backend.document(Path::new("doc.xlsb")).unwrap();
        let value = doc.sheet("Pricing Setup").unwrap().get("F2").unwrap();
        assert_eq!(value, CellValue::Empty);
    }

    #[test]
    fn test_dropped_handle_releases_lock() {
        let backend = backend_with_doc("doc.xlsb");
        {
            let _handle = backend.open(Path::new("doc.xlsb")).unwrap();
            assert!(backend.is_open(Path::new("doc.xlsb")));
        }
        assert!(!backend.is_open(Path::new("doc.xlsb")));
    }

    #[test]
    fn test_missing_sheet() {
        let backend = backend_with_doc("doc.xlsb");
        let mut handle = backend.open(Path::new("doc.xlsb")).unwrap();
        assert!(handle.sheet("Resource Setup").is_err());
        handle.close(false).unwrap();
    }
}
