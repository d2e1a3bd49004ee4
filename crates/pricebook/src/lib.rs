//! # pricebook
//!
//! Field reconciliation and atomic multi-operation writes for
//! semi-structured pricing workbooks.
//!
//! Pricebook locates labelled fields in a workbook by fuzzy label
//! matching, writes values next to them with read-back verification,
//! copies resource blocks between documents, and derives client rates
//! from standard costs. One orchestrated session runs all of it against
//! a single open/save/close cycle.
//!
//! ## Example
//!
//! ```rust
//! use pricebook::prelude::*;
//!
//! // An in-memory workbook stands in for a real document backend.
//! let backend = MemoryBackend::new();
//! let mut doc = MemoryDocument::new();
//! doc.add_sheet("Pricing Setup").set("E2", "Client Name:").unwrap();
//! backend.insert("deal.xlsb", doc);
//!
//! let fields: FieldMap = [("Client Name", "Acme Corp")].into_iter().collect();
//! let orchestrator = Orchestrator::new(backend.clone());
//! let result = orchestrator.run(&SessionRequest::new("deal.xlsb", fields));
//!
//! assert!(result.overall_success);
//! let saved = backend.document("deal.xlsb".as_ref()).unwrap();
//! let sheet = saved.sheet("Pricing Setup").unwrap();
//! assert_eq!(sheet.get("F2").unwrap(), CellValue::Text("Acme Corp".into()));
//! ```

pub mod prelude;

// Re-export core types
pub use pricebook_core::{
    CellLocation,
    CellRef,
    CellValue,
    Category,
    DerivedRate,
    Error,
    FieldKind,
    FieldMap,
    FieldSpec,
    MatchCandidate,
    MatchMethod,
    PopulationOutcome,
    RateOutcome,
    ReconcileConfig,
    Reporting,
    Result,
    SessionResult,
    SheetRead,
    SheetWrite,
    StandardCostRate,
    Verbosity,
    parse_margin,
    BlockCopyOutcome,
    DEFAULT_MATCH_THRESHOLD,
    SESSION_MATCH_THRESHOLD,
};

// Re-export matching
pub use pricebook_match::{
    match_fields, normalize_label, reconcile_sheet, scan_candidates, similarity,
};

// Re-export sessions and operations
pub use pricebook_session::{
    copy_block, derive_rate, derive_rates, find_source_block, find_target_area, populate,
    read_source_fields, read_standard_rates, write_derived_rates, BlockRange, DocumentBackend,
    DocumentHandle, MemoryBackend, MemoryDocument, MemorySheet, Orchestrator, SessionRequest,
    SessionStrategy,
};
