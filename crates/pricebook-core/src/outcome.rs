//! Result records produced by the reconciliation operations
//!
//! All records here are plain data: primitives, strings, or nested records,
//! so a [`SessionResult`] can be serialized as the sole output of an
//! orchestrated run.

use crate::cell::CellRef;
use serde::{Deserialize, Serialize};

/// A string-bearing cell found by the candidate scanner.
///
/// `content` is the trimmed text at scan time; it is a snapshot, not a live
/// view, and must not be retained across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLocation {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based)
    pub column: u32,
    /// A1-style reference, e.g. "E12"
    pub reference: String,
    /// Trimmed cell text at scan time
    pub content: String,
}

impl CellLocation {
    pub fn new(row: u32, column: u32, content: impl Into<String>) -> Self {
        Self {
            row,
            column,
            reference: CellRef::new(row, column).to_string(),
            content: content.into(),
        }
    }

    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.row, self.column)
    }
}

/// Which scan mode produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Optimized,
    Generic,
}

/// A source field resolved to its best-scoring target cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub source_field: String,
    pub target: CellLocation,
    /// Similarity score in [0, 1]
    pub confidence: f64,
    pub source_value: String,
    pub method: MatchMethod,
}

/// Outcome of one population call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationOutcome {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub errors: Vec<String>,
    pub populated_names: Vec<String>,
}

impl PopulationOutcome {
    /// Success rate as a percentage (0 when nothing was attempted).
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.attempted as f64) * 100.0
        }
    }
}

/// Outcome of the block copy operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockCopyOutcome {
    pub cells_copied: u32,
    pub source_range: Option<String>,
    pub target_range: Option<String>,
    pub success: bool,
    /// Why discovery or copying failed, when it did.
    pub reason: Option<String>,
}

impl BlockCopyOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// A standard cost rate read from one row of the rate block.
///
/// Invalid entries are retained so the list stays row-aligned with the
/// derived output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardCostRate {
    pub level: String,
    pub cost: Option<f64>,
    pub row: Option<u32>,
    pub valid: bool,
    pub error: Option<String>,
}

impl StandardCostRate {
    pub fn valid(level: impl Into<String>, cost: f64, row: u32) -> Self {
        Self {
            level: level.into(),
            cost: Some(cost),
            row: Some(row),
            valid: true,
            error: None,
        }
    }

    pub fn invalid(level: impl Into<String>, row: u32, error: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            cost: None,
            row: Some(row),
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// A derived rate for one row, valid or carried through as skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRate {
    pub level: String,
    pub cost: Option<f64>,
    pub row: Option<u32>,
    pub valid: bool,
    pub error: Option<String>,
    pub margin: f64,
    pub derived: Option<i64>,
}

/// Outcome of the rate calculation operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateOutcome {
    pub rates_read: u32,
    pub derived: u32,
    pub written: u32,
    pub skipped: u32,
    pub success: bool,
    pub errors: Vec<String>,
}

/// Consolidated result of one orchestrated session.
///
/// Created at orchestration start, filled in as each operation completes,
/// and returned exactly once after the document handle has closed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionResult {
    pub population: Option<PopulationOutcome>,
    pub block_copy: Option<BlockCopyOutcome>,
    pub rate_calc: Option<RateOutcome>,
    pub overall_success: bool,
    pub operations_completed: u32,
    pub total_operations: u32,
    pub errors: Vec<String>,
    pub elapsed_seconds: f64,
}
