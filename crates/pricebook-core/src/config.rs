//! Configuration surface for a reconciliation run

use serde::{Deserialize, Serialize};

/// Default similarity threshold for direct matching calls.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.65;

/// Stricter threshold applied by the orchestrated entry point.
pub const SESSION_MATCH_THRESHOLD: f64 = 0.8;

/// Column and bound configuration for one reconciliation run.
///
/// Columns are 1-based numbers (A=1). Defaults mirror the document layout
/// the engine was built against: labels in column E with values in F on the
/// field sheet, source fields in C/D of the reference document, standard
/// cost rates in Q and derived rates in O of the resource sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Minimum similarity score for a candidate to match a source field.
    pub threshold: f64,
    /// Row cap for the optimized candidate scan.
    pub row_scan_limit: u32,
    /// Label column on the field sheet.
    pub label_column: u32,
    /// Value column adjacent to the label column.
    pub value_column: u32,
    /// Label column in the reference (source-field) document.
    pub source_label_column: u32,
    /// Value column in the reference document.
    pub source_value_column: u32,
    /// Number of resource rows handled by block copy and rate derivation.
    pub resource_row_count: u32,
    /// Column holding standard cost rates on the resource sheet.
    pub standard_rate_column: u32,
    /// Column the derived rates are written to.
    pub derived_rate_column: u32,
    /// First row of the rate block.
    pub rate_start_row: u32,
    /// Sheet holding the labelled fields.
    pub field_sheet: String,
    /// Sheet holding the resource block and rate columns.
    pub resource_sheet: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            threshold: SESSION_MATCH_THRESHOLD,
            row_scan_limit: 100,
            label_column: 5,            // E
            value_column: 6,            // F
            source_label_column: 3,     // C
            source_value_column: 4,     // D
            resource_row_count: 7,
            standard_rate_column: 17,   // Q
            derived_rate_column: 15,    // O
            rate_start_row: 28,
            field_sheet: "Pricing Setup".to_string(),
            resource_sheet: "Resource Setup".to_string(),
        }
    }
}

/// How chatty a session should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Message categories a session can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Matching,
    Writes,
    Session,
}

/// Explicit reporting configuration, passed to the orchestrator at
/// construction instead of living in process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reporting {
    pub verbosity: Verbosity,
    pub matching: bool,
    pub writes: bool,
    pub session: bool,
}

impl Default for Reporting {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            matching: true,
            writes: true,
            session: true,
        }
    }
}

impl Reporting {
    /// Fully silent reporting.
    pub fn quiet() -> Self {
        Self {
            verbosity: Verbosity::Quiet,
            matching: false,
            writes: false,
            session: false,
        }
    }

    /// Whether messages in `category` should be emitted at all.
    pub fn enabled(&self, category: Category) -> bool {
        if self.verbosity == Verbosity::Quiet {
            return false;
        }
        match category {
            Category::Matching => self.matching,
            Category::Writes => self.writes,
            Category::Session => self.session,
        }
    }
}
