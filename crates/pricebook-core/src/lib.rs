//! # pricebook-core
//!
//! Core data structures for the pricebook reconciliation engine: cell
//! references and values, the source-field mapping, run configuration, the
//! sheet access seams, and the result records every operation reports
//! through.
//!
//! The matching algorithms live in `pricebook-match`; the write operations
//! and session orchestration live in `pricebook-session`.

pub mod cell;
pub mod config;
pub mod error;
pub mod fields;
pub mod margin;
pub mod outcome;
pub mod sheet;
pub mod value;

pub use cell::CellRef;
pub use config::{
    Category, Reporting, ReconcileConfig, Verbosity, DEFAULT_MATCH_THRESHOLD,
    SESSION_MATCH_THRESHOLD,
};
pub use error::{Error, Result};
pub use fields::{FieldKind, FieldMap, FieldSpec};
pub use margin::parse_margin;
pub use outcome::{
    BlockCopyOutcome, CellLocation, DerivedRate, MatchCandidate, MatchMethod,
    PopulationOutcome, RateOutcome, SessionResult, StandardCostRate,
};
pub use sheet::{SheetRead, SheetWrite};
pub use value::CellValue;
