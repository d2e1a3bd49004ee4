//! Document backend seam
//!
//! The concrete document/automation layer is a collaborator behind these
//! traits: one implementation per backend (an in-memory workbook ships in
//! this crate; automation bridges to a real spreadsheet application live
//! elsewhere). The capability set is fixed: open, close-with-save, sheet
//! listing, and per-sheet read/write.

use pricebook_core::{Result, SheetWrite};
use std::path::Path;

/// An exclusively-held handle to one open document.
///
/// The handle owns the document for the lifetime of a session. Sheets are
/// resolved once and served from the handle's own state; dropping the
/// handle releases the document without saving.
pub trait DocumentHandle {
    /// Names of the document's sheets, in document order.
    fn sheet_names(&self) -> Vec<String>;

    /// Borrow a sheet by name for reading and writing.
    fn sheet(&mut self, name: &str) -> Result<&mut dyn SheetWrite>;

    /// Close the handle, saving first when `save` is true.
    ///
    /// Consumes the handle: nothing may retain it past the session.
    fn close(self: Box<Self>, save: bool) -> Result<()>;
}

/// A backend capable of opening documents exclusively.
pub trait DocumentBackend {
    /// Open the document at `path` with exclusive access.
    ///
    /// Fails with [`pricebook_core::Error::DocumentAccess`] when the
    /// document does not exist or is already held open elsewhere. A second
    /// concurrent open must fail rather than share state; the orchestrator
    /// relies on this to keep two sessions off the same document.
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentHandle>>;

    /// Whether one handle can safely serve several dependent operations.
    ///
    /// Backends that cannot (for example, bridges that must cycle the
    /// hosting application between operations) make the orchestrator use
    /// the independent-session strategy from the start.
    fn supports_shared_handle(&self) -> bool {
        true
    }
}
