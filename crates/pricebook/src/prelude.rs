//! Prelude module - common imports for pricebook users
//!
//! ```rust
//! use pricebook::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellRef,
    CellValue,
    // Configuration
    ReconcileConfig,
    Reporting,
    // Error types
    Error,
    Result,
    // Fields
    FieldMap,
    FieldSpec,
    // Matching
    match_fields,
    normalize_label,
    reconcile_sheet,
    similarity,
    MatchCandidate,
    // Sheet access
    SheetRead,
    SheetWrite,
    // Backends
    DocumentBackend,
    DocumentHandle,
    MemoryBackend,
    MemoryDocument,
    MemorySheet,
    // Operations
    copy_block,
    derive_rate,
    populate,
    // Orchestration
    Orchestrator,
    SessionRequest,
    SessionResult,
    SessionStrategy,
};
